//! Profile extraction logic and port trait definitions for Rapport.
//!
//! This crate defines the "ports" (LLM provider and key-value store traits)
//! that the infrastructure layer implements, and the extraction-and-merge
//! engine built on top of them. It depends only on `rapport-types` -- never
//! on `rapport-infra` or any database/IO crate.

pub mod llm;
pub mod profile;
pub mod storage;
