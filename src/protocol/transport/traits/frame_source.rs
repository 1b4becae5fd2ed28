//! Minimal abstraction for the receiving side of the vehicle bus. Allows the
//! library to plug into various drivers (embedded HAL, SocketCAN, replay).
use crate::error::AcquisitionError;
use crate::protocol::transport::can_frame::RawFrame;
use crate::protocol::transport::traits::dash_timer::{with_timeout, DashTimer};
use futures_util::Future;

/// Contract to receive CAN frames asynchronously.
///
/// Implementations wait until the controller delivers a frame and perform no
/// decoding. The bound on that wait is applied by [`receive_frame`].
pub trait FrameSource {
    type Error: core::fmt::Debug;
    /// Retrieve the next available frame. Asynchronously waits until data arrives.
    fn recv<'a>(&'a mut self) -> impl Future<Output = Result<RawFrame, Self::Error>> + 'a;
}

/// Receive one frame, giving up after `timeout_ms`.
///
/// Returns [`AcquisitionError::Timeout`] when the bound elapses first, which
/// callers can tell apart from a driver failure ([`AcquisitionError::Bus`]).
pub async fn receive_frame<S: FrameSource, T: DashTimer>(
    source: &mut S,
    timer: &mut T,
    timeout_ms: u32,
) -> Result<RawFrame, AcquisitionError<S::Error>> {
    with_timeout(timer, timeout_ms, source.recv())
        .await?
        .map_err(AcquisitionError::Bus)
}
