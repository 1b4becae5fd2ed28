//! Mailbox tests: overwrite semantics, repeated reads, and change tracking.
//! Async paths are polled once with timers that either fire immediately or
//! never fire, so no executor is needed here.
use super::*;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use futures_util::FutureExt;

/// Timer whose delay has already elapsed.
struct ElapsedTimer;

impl DashTimer for ElapsedTimer {
    async fn delay_ms(&mut self, _millis: u32) {}
}

/// Timer that never fires.
struct FrozenTimer;

impl DashTimer for FrozenTimer {
    async fn delay_ms(&mut self, _millis: u32) {
        core::future::pending::<()>().await
    }
}

fn snapshot(rpm: u16) -> VehicleSnapshot {
    VehicleSnapshot {
        rpm,
        ..VehicleSnapshot::new()
    }
}

#[test]
/// Two publishes without a read leave only the second one visible.
fn test_publish_overwrites() {
    let mailbox = SnapshotMailbox::<NoopRawMutex>::new();
    mailbox.publish(snapshot(1000));
    mailbox.publish(snapshot(2000));

    let received = mailbox
        .receive(&mut FrozenTimer, 100)
        .now_or_never()
        .expect("value is ready");
    assert_eq!(received, Ok(snapshot(2000)));
}

#[test]
/// An empty mailbox times out instead of yielding a default snapshot.
fn test_empty_mailbox_times_out() {
    let mailbox = SnapshotMailbox::<NoopRawMutex>::new();
    assert_eq!(mailbox.try_receive(), None);

    let received = mailbox
        .receive(&mut ElapsedTimer, 100)
        .now_or_never()
        .expect("timer already elapsed");
    assert_eq!(received, Err(RecvError::TimedOut));
}

#[test]
/// Without a new publish the empty mailbox keeps waiting.
fn test_empty_mailbox_waits() {
    let mailbox = SnapshotMailbox::<NoopRawMutex>::new();
    assert!(mailbox.receive(&mut FrozenTimer, 100).now_or_never().is_none());
}

#[test]
/// Reads do not consume the value: it stays until overwritten.
fn test_repeated_reads_return_last_value() {
    let mailbox = SnapshotMailbox::<NoopRawMutex>::new();
    mailbox.publish(snapshot(3000));

    for _ in 0..3 {
        let received = mailbox.receive(&mut ElapsedTimer, 0).now_or_never();
        assert_eq!(received, Some(Ok(snapshot(3000))));
    }
    assert_eq!(mailbox.try_receive(), Some(snapshot(3000)));
}

#[test]
/// `changed` only returns values this receiver has not seen yet.
fn test_receiver_tracks_changes() {
    let mailbox = SnapshotMailbox::<NoopRawMutex>::new();
    let mut receiver = mailbox.receiver();
    let publisher = mailbox.publisher();

    assert_eq!(receiver.try_changed(), None);

    publisher.publish(snapshot(800));
    assert_eq!(receiver.try_changed(), Some(snapshot(800)));
    assert_eq!(receiver.try_changed(), None);

    let starved = receiver.changed(&mut ElapsedTimer, 10).now_or_never();
    assert_eq!(starved, Some(Err(RecvError::TimedOut)));

    publisher.publish(snapshot(800));
    // Same value, new publish: still a change for the receiver.
    let fresh = receiver.changed(&mut FrozenTimer, 10).now_or_never();
    assert_eq!(fresh, Some(Ok(snapshot(800))));
}

#[test]
/// `receive` on a handle marks the value as seen.
fn test_receiver_receive_marks_seen() {
    let mailbox = SnapshotMailbox::<NoopRawMutex>::new();
    let mut receiver = mailbox.receiver();
    mailbox.publish(snapshot(1200));

    let first = receiver.receive(&mut FrozenTimer, 10).now_or_never();
    assert_eq!(first, Some(Ok(snapshot(1200))));
    assert_eq!(receiver.try_changed(), None);

    let again = receiver.receive(&mut FrozenTimer, 10).now_or_never();
    assert_eq!(again, Some(Ok(snapshot(1200))));
}
