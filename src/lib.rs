//! `canbus-dash` library: the acquisition, decode and handoff core of a
//! vehicle dashboard fed by a CAN bus, usable in a `no_std` environment.
//! The crate exposes the wire side (frames, identifiers, metric decoders, bus
//! abstraction traits) and the telemetry side (snapshot, debounced aggregator,
//! single-slot mailbox, producer and consumer loops, gauge scales).
#![no_std]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("features `defmt` and `log` are mutually exclusive");

// Must stay first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;
//==================================================================================
/// Frame construction, mailbox and acquisition errors.
pub mod error;
/// Wire side: raw CAN frames, identifiers, decoders, and bus traits.
pub mod protocol;
/// State side: vehicle snapshot, aggregator, mailbox, loops, gauges.
pub mod telemetry;
//==================================================================================
