//! Dashboard transport layer: raw CAN frame representation, 11-bit identifier
//! management, and bus/timer abstraction traits.
//!
//! ## Timing Constants
//!
//! These constants define the default bounds of the acquisition and display
//! loops. They seed [`AcquisitionConfig`](crate::telemetry::acquisition::AcquisitionConfig)
//! and [`DisplayConfig`](crate::telemetry::display::DisplayConfig).

pub mod can_frame;
pub mod can_id;
pub mod traits;

/// Nominal bit rate of the vehicle bus (bit/s).
///
/// Informational only: the controller bring-up negotiates nothing and is done
/// outside of this crate. The frame timings below assume this rate.
pub const BUS_BITRATE: u32 = 500_000;

/// Upper bound for a single frame receive (ms).
///
/// The engine ECUs broadcast the metrics of interest every 10–100 ms, so three
/// seconds without any frame means the bus is silent or disconnected. The
/// acquisition loop then skips the cycle and tries again; it never escalates.
pub const FRAME_RECEIVE_TIMEOUT_MS: u32 = 3000;

/// Delay inserted at the end of every acquisition cycle (ms).
///
/// Yields the executor so that tasks sharing the acquisition context are not
/// starved when the bus delivers frames back to back.
pub const ACQUISITION_YIELD_MS: u32 = 10;

/// Upper bound for a display-side snapshot wait (ms).
///
/// After this delay without a fresh snapshot the consumer is told the data is
/// stale; what it does with that signal is up to the renderer.
pub const DISPLAY_RECEIVE_TIMEOUT_MS: u32 = 1000;
