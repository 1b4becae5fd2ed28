//! Debounced state aggregator: merges decoded metrics into the current
//! snapshot and decides, by full-snapshot equality, whether to publish.
use crate::protocol::decode::{decode_frame, DecodedFrame};
use crate::protocol::transport::can_frame::RawFrame;
use crate::telemetry::snapshot::VehicleSnapshot;

/// Owns the working snapshot and the last value handed to the mailbox.
#[derive(Debug, Default, Clone)]
pub struct SnapshotAggregator {
    current: VehicleSnapshot,
    /// `None` until the first publish, so an all-zero first reading still goes out.
    last_published: Option<VehicleSnapshot>,
}

impl SnapshotAggregator {
    /// Create an aggregator with a zeroed snapshot and nothing published.
    pub const fn new() -> Self {
        Self {
            current: VehicleSnapshot::new(),
            last_published: None,
        }
    }

    /// Working snapshot, including fields not published yet.
    pub fn current(&self) -> &VehicleSnapshot {
        &self.current
    }

    /// Last snapshot returned by [`ingest`](Self::ingest), if any.
    pub fn last_published(&self) -> Option<&VehicleSnapshot> {
        self.last_published.as_ref()
    }

    /// Decode `frame`, merge it, and return the snapshot to publish.
    ///
    /// Returns `None` when no decoder fired for the frame or when the merged
    /// snapshot equals the last published one.
    pub fn ingest(&mut self, frame: &RawFrame) -> Option<VehicleSnapshot> {
        self.ingest_decoded(&decode_frame(frame))
    }

    /// Same as [`ingest`](Self::ingest) for a frame the caller already decoded.
    pub fn ingest_decoded(&mut self, decoded: &DecodedFrame) -> Option<VehicleSnapshot> {
        if !self.current.apply(decoded) {
            return None;
        }
        if self.last_published == Some(self.current) {
            return None;
        }
        self.last_published = Some(self.current);
        Some(self.current)
    }
}
