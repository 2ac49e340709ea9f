//! Infrastructure layer for Rapport.
//!
//! Contains implementations of the ports defined in `rapport-core`:
//! SQLite key-value storage and the `config.toml` loader.

pub mod config;
pub mod sqlite;
