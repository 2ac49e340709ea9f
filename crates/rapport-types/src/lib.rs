//! Shared domain types for Rapport.
//!
//! This crate contains the core domain types used across the Rapport crates:
//! participant records, extraction results, conversation state, LLM request
//! shapes, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod profile;
pub mod storage;
