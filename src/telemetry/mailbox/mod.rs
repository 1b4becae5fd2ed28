//! Single-slot snapshot mailbox moving the latest [`VehicleSnapshot`] from the
//! acquisition task to the display task.
//!
//! Writes overwrite, they never enqueue: there is no history and no
//! backpressure. The slot lives behind a blocking mutex, so a reader always
//! sees a complete snapshot, and a [`Signal`] wakes the waiting reader.
//!
//! Firmware provides the mailbox (usually from a `static`) and hands
//! [`SnapshotPublisher`] / [`SnapshotReceiver`] handles to its tasks. No
//! allocation is performed by the library.
//!
//! The mailbox supports one waiting consumer at a time.
use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use crate::error::RecvError;
use crate::protocol::transport::traits::dash_timer::{with_timeout, DashTimer};
use crate::telemetry::snapshot::VehicleSnapshot;

/// Mailbox flavour safe to share between cores or interrupt priorities.
pub type DashMailbox = SnapshotMailbox<CriticalSectionRawMutex>;

#[derive(Debug, Clone, Copy)]
struct Slot {
    /// Bumped on every publish; lets receivers detect new values.
    generation: u32,
    snapshot: Option<VehicleSnapshot>,
}

impl Slot {
    const EMPTY: Slot = Slot {
        generation: 0,
        snapshot: None,
    };
}

/// One-item, overwrite-on-write handoff between two execution contexts.
pub struct SnapshotMailbox<M: RawMutex> {
    slot: Mutex<M, Cell<Slot>>,
    published: Signal<M, ()>,
}

impl<M: RawMutex> Default for SnapshotMailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SnapshotMailbox<M> {
    /// Create an empty mailbox.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot::EMPTY)),
            published: Signal::new(),
        }
    }

    /// Producer handle.
    pub fn publisher(&self) -> SnapshotPublisher<'_, M> {
        SnapshotPublisher { mailbox: self }
    }

    /// Consumer handle tracking which value it has already returned.
    pub fn receiver(&self) -> SnapshotReceiver<'_, M> {
        SnapshotReceiver {
            mailbox: self,
            seen: Slot::EMPTY.generation,
        }
    }

    /// Replace the stored snapshot. Never blocks, always succeeds.
    pub fn publish(&self, snapshot: VehicleSnapshot) {
        self.slot.lock(|slot| {
            let generation = slot.get().generation.wrapping_add(1);
            slot.set(Slot {
                generation,
                snapshot: Some(snapshot),
            });
        });
        self.published.signal(());
    }

    /// Latest snapshot, if one was ever published.
    pub fn try_receive(&self) -> Option<VehicleSnapshot> {
        self.load().snapshot
    }

    /// Latest snapshot, waiting up to `timeout_ms` for the first publish.
    ///
    /// Once a value exists it is returned immediately, again and again, until
    /// it is overwritten. With an empty mailbox the wait ends with
    /// [`RecvError::TimedOut`], never with a default snapshot.
    pub async fn receive<T: DashTimer>(
        &self,
        timer: &mut T,
        timeout_ms: u32,
    ) -> Result<VehicleSnapshot, RecvError> {
        let (_, snapshot) = with_timeout(timer, timeout_ms, self.wait_newer_than(None)).await?;
        Ok(snapshot)
    }

    fn load(&self) -> Slot {
        self.slot.lock(|slot| slot.get())
    }

    /// Wait for a published value whose generation differs from `seen`
    /// (any published value when `seen` is `None`).
    async fn wait_newer_than(&self, seen: Option<u32>) -> (u32, VehicleSnapshot) {
        loop {
            let slot = self.load();
            if let Some(snapshot) = slot.snapshot {
                if seen != Some(slot.generation) {
                    return (slot.generation, snapshot);
                }
            }
            // A publish racing with the check above leaves the signal set,
            // so this wait returns immediately and the loop re-checks.
            self.published.wait().await;
        }
    }
}

//==================================================================================HANDLES
/// Producer side of a [`SnapshotMailbox`].
pub struct SnapshotPublisher<'a, M: RawMutex> {
    mailbox: &'a SnapshotMailbox<M>,
}

impl<M: RawMutex> Clone for SnapshotPublisher<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex> Copy for SnapshotPublisher<'_, M> {}

impl<M: RawMutex> SnapshotPublisher<'_, M> {
    /// See [`SnapshotMailbox::publish`].
    pub fn publish(&self, snapshot: VehicleSnapshot) {
        self.mailbox.publish(snapshot);
    }
}

/// Consumer side of a [`SnapshotMailbox`].
pub struct SnapshotReceiver<'a, M: RawMutex> {
    mailbox: &'a SnapshotMailbox<M>,
    seen: u32,
}

impl<M: RawMutex> SnapshotReceiver<'_, M> {
    /// Latest snapshot with mailbox semantics; see [`SnapshotMailbox::receive`].
    pub async fn receive<T: DashTimer>(
        &mut self,
        timer: &mut T,
        timeout_ms: u32,
    ) -> Result<VehicleSnapshot, RecvError> {
        let (generation, snapshot) =
            with_timeout(timer, timeout_ms, self.mailbox.wait_newer_than(None)).await?;
        self.seen = generation;
        Ok(snapshot)
    }

    /// Wait up to `timeout_ms` for a snapshot this handle has not returned yet.
    ///
    /// [`RecvError::TimedOut`] here means the producer published nothing for
    /// the whole period: the consumer decides whether to flag its data stale.
    pub async fn changed<T: DashTimer>(
        &mut self,
        timer: &mut T,
        timeout_ms: u32,
    ) -> Result<VehicleSnapshot, RecvError> {
        let (generation, snapshot) = with_timeout(
            timer,
            timeout_ms,
            self.mailbox.wait_newer_than(Some(self.seen)),
        )
        .await?;
        self.seen = generation;
        Ok(snapshot)
    }

    /// Non-blocking [`changed`](Self::changed).
    pub fn try_changed(&mut self) -> Option<VehicleSnapshot> {
        let slot = self.mailbox.load();
        let snapshot = slot.snapshot?;
        if slot.generation == self.seen {
            return None;
        }
        self.seen = slot.generation;
        Some(snapshot)
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
