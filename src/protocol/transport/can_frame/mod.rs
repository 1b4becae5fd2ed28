//! In-memory representation of a classic CAN data frame as delivered by the
//! vehicle bus controller.
use crate::error::FrameError;
use crate::protocol::transport::can_id::{FrameId, MetricId};
use embedded_can::{Frame, Id};

/// Classic CAN frames never carry more than eight payload bytes.
pub const MAX_PAYLOAD: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw frame as read from the CAN bus. Scope is one decode cycle.
pub struct RawFrame {
    /// 11-bit standard identifier.
    pub id: FrameId,
    /// Payload buffer. Bytes past `len` are zero.
    pub data: [u8; MAX_PAYLOAD],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl RawFrame {
    /// Build a frame from an identifier and up to eight payload bytes.
    pub fn new(id: FrameId, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD {
            return Err(FrameError::InvalidLength { len: payload.len() });
        }
        let mut data = [0u8; MAX_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    /// Convert any HAL frame implementing [`embedded_can::Frame`].
    ///
    /// Only standard data frames are accepted.
    pub fn from_frame<F: Frame>(frame: &F) -> Result<Self, FrameError> {
        if frame.is_remote_frame() {
            return Err(FrameError::RemoteFrame);
        }
        let id = match frame.id() {
            Id::Standard(id) => FrameId::from(id),
            Id::Extended(_) => return Err(FrameError::ExtendedIdentifier),
        };
        Self::new(id, frame.data())
    }

    /// Dashboard metric carried by this frame, if any.
    pub fn metric(&self) -> Option<MetricId> {
        self.id.metric()
    }

    /// Valid payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Payload byte at `index`, zero when outside the fixed buffer.
    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        self.data.get(index).copied().unwrap_or(0)
    }
}

impl Frame for RawFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        match id.into() {
            Id::Standard(id) => RawFrame::new(FrameId::from(id), data).ok(),
            Id::Extended(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        false
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Standard(self.id.into())
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
