//! Abstraction traits used by the transport layer (frame source, mirror sink,
//! and timer) plus the timeout helpers built on top of them.
pub mod dash_timer;
pub mod frame_sink;
pub mod frame_source;
