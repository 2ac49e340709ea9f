//! Key-value store trait.
//!
//! Defines the interface for opaque string-keyed JSON storage.
//! Implementations live in rapport-infra (SQLite) and in [`super::memory`].

use std::sync::Arc;

use rapport_types::error::RepositoryError;
use rapport_types::storage::KvEntry;

/// Trait for string-keyed persistent storage of JSON values.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get the full entry including timestamps.
    fn get_entry(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<KvEntry>, RepositoryError>> + Send;
}

/// Shared stores delegate to the inner store.
impl<T: KvStore> KvStore for Arc<T> {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send
    {
        (**self).get(key)
    }

    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send {
        (**self).set(key, value)
    }

    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send {
        (**self).delete(key)
    }

    fn get_entry(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<KvEntry>, RepositoryError>> + Send {
        (**self).get_entry(key)
    }
}
