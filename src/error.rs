//! Error definitions shared across library modules.
//! Each type models one failure scenario of the pipeline (frame construction,
//! bounded acquisition, mailbox starvation). None of them is fatal: the loops
//! contain every failure and only the mailbox timeout reaches the consumer.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur while building a [`RawFrame`](crate::protocol::transport::can_frame::RawFrame).
pub enum FrameError {
    /// Identifier does not fit the 11-bit standard range.
    #[error("Invalid standard identifier: {id:#X}")]
    InvalidIdentifier { id: u16 },
    /// Payload is longer than a classic CAN frame allows.
    #[error("Invalid payload length: {len}")]
    InvalidLength { len: usize },
    /// Frame uses a 29-bit identifier; the dashboard bus is 11-bit only.
    #[error("Extended identifiers are not supported")]
    ExtendedIdentifier,
    /// Remote transmission requests carry no data to decode.
    #[error("Remote frames are not supported")]
    RemoteFrame,
}

#[derive(Error, Debug)]
/// Failures while pulling one frame from the bus within the cycle bound.
pub enum AcquisitionError<E: core::fmt::Debug> {
    /// No frame arrived before the receive timeout elapsed.
    #[error("No frame received before timeout")]
    Timeout,
    /// The frame source reported a driver error.
    #[error("Frame source error: {0:?}")]
    Bus(E),
}

impl<E: core::fmt::Debug> From<TimedOut> for AcquisitionError<E> {
    fn from(_: TimedOut) -> Self {
        Self::Timeout
    }
}

//==================================================================================MAILBOX_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors returned to the consumer side of the snapshot mailbox.
pub enum RecvError {
    /// No (new) snapshot was published before the timeout elapsed.
    #[error("Snapshot receive timed out")]
    TimedOut,
}

impl From<TimedOut> for RecvError {
    fn from(_: TimedOut) -> Self {
        Self::TimedOut
    }
}

//==================================================================================TIMEOUT
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Marker returned when a future loses the race against its timer.
#[error("Operation timed out")]
pub struct TimedOut;
