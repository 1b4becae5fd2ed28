//! Transmit-side abstraction used to mirror decoded frames onto a second
//! controller (e.g. a bridge to another bus segment or a logger).
use crate::protocol::transport::can_frame::RawFrame;
use futures_util::Future;

/// Contract to emit CAN frames asynchronously.
pub trait FrameSink {
    type Error: core::fmt::Debug;
    /// Emit a frame. Asynchronous to accommodate non-blocking drivers.
    fn send<'a>(
        &'a mut self,
        frame: &'a RawFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

/// Sink used when mirroring is disabled. Accepts and drops every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMirror;

impl FrameSink for NoMirror {
    type Error = core::convert::Infallible;

    async fn send<'a>(&'a mut self, _frame: &'a RawFrame) -> Result<(), Self::Error> {
        Ok(())
    }
}
