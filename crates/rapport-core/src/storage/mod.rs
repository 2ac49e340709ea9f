//! Storage abstractions for Rapport.
//!
//! Defines the key-value store trait and an in-process implementation.
//! Durable implementations live in rapport-infra.

pub mod kv_store;
pub mod memory;
