//! State side of the dashboard: the decoded vehicle snapshot, the debounced
//! aggregator, the single-slot mailbox crossing execution contexts, the
//! producer/consumer loops, and gauge scaling helpers for renderers.
pub mod acquisition;
pub mod aggregator;
pub mod display;
pub mod gauge;
pub mod mailbox;
pub mod snapshot;
