//! Wire side of the dashboard: CAN frame and identifier model, the per-metric
//! decoders, and the traits the bus drivers implement.
pub mod decode;
pub mod transport;
