//! Storage types for Rapport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key-value entry in the persistent KV store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
