//! Observability setup for processes embedding Rapport.
//!
//! The library crates only emit `tracing` events and spans; hosts call
//! [`tracing_setup::init_tracing`] once at startup to decide where they go.

pub mod tracing_setup;
