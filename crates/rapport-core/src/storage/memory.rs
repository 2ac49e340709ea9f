//! In-process key-value store backed by a `DashMap`.
//!
//! Suitable for tests and for hosts that do not need durability. Values are
//! cloned in and out, so callers never observe shared mutation.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use dashmap::DashMap;

use rapport_types::error::RepositoryError;
use rapport_types::storage::KvEntry;

use super::kv_store::KvStore;

#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: DashMap<String, KvEntry>,
    writes: AtomicUsize,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.entries.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let now = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .entry(key.to_string())
            .and_modify(|e| {
                e.value = value.clone();
                e.updated_at = now;
            })
            .or_insert_with(|| KvEntry {
                key: key.to_string(),
                value: value.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, RepositoryError> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }
}
