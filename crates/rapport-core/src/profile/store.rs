//! Record store accessor.
//!
//! Maps an (agent, participant) pair to a stable key and reads/writes whole
//! `ParticipantRecord`s through any [`KvStore`].

use std::borrow::Cow;
use std::fmt;

use rapport_types::error::RepositoryError;
use rapport_types::profile::ParticipantRecord;

use crate::storage::kv_store::KvStore;

/// Last segment of every record key.
pub const RECORD_KEY_SUFFIX: &str = "user_data";

/// Storage key of one participant's record: `{agent}/{participant}/user_data`.
///
/// Segments are escaped (`%` as `%25`, `/` as `%2F`) so identifiers that
/// contain the delimiter cannot collide with other pairs. Identifiers without
/// either character are written verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(agent_name: &str, participant: &str) -> Self {
        Self(format!(
            "{}/{}/{RECORD_KEY_SUFFIX}",
            escape_segment(agent_name),
            escape_segment(participant)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(['/', '%']) {
        Cow::Owned(segment.replace('%', "%25").replace('/', "%2F"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Typed view of a [`KvStore`] holding participant records.
#[derive(Debug)]
pub struct RecordStore<S> {
    kv: S,
}

impl<S: KvStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// The underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Load the record under `key`, or the empty record if nothing is stored.
    ///
    /// A stored value that is not a record is reported as
    /// [`RepositoryError::InvalidValue`] rather than silently reset.
    #[tracing::instrument(name = "load_record", skip(self, key), fields(key = %key))]
    pub async fn load(&self, key: &RecordKey) -> Result<ParticipantRecord, RepositoryError> {
        match self.kv.get(key.as_str()).await? {
            None | Some(serde_json::Value::Null) => Ok(ParticipantRecord::default()),
            Some(value) if !value.is_object() => Err(RepositoryError::InvalidValue {
                key: key.to_string(),
                message: "expected a JSON object".to_string(),
            }),
            Some(value) => {
                serde_json::from_value(value).map_err(|e| RepositoryError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Overwrite the record under `key`.
    #[tracing::instrument(name = "save_record", skip(self, key, record), fields(key = %key))]
    pub async fn save(
        &self,
        key: &RecordKey,
        record: &ParticipantRecord,
    ) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(record).map_err(|e| RepositoryError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.kv.set(key.as_str(), &value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryKvStore;

    #[test]
    fn test_key_format() {
        let key = RecordKey::new("Ava", "david");
        assert_eq!(key.as_str(), "Ava/david/user_data");
        assert_eq!(key.to_string(), "Ava/david/user_data");
    }

    #[test]
    fn test_key_is_deterministic() {
        assert_eq!(RecordKey::new("Ava", "jo"), RecordKey::new("Ava", "jo"));
        assert_ne!(RecordKey::new("Ava", "jo"), RecordKey::new("Ava", "jon"));
        assert_ne!(RecordKey::new("Ava", "jo"), RecordKey::new("Bea", "jo"));
    }

    #[test]
    fn test_key_escapes_delimiter() {
        // Without escaping both pairs would map to "a/b/c/user_data".
        let left = RecordKey::new("a/b", "c");
        let right = RecordKey::new("a", "b/c");
        assert_ne!(left, right);
        assert_eq!(left.as_str(), "a%2Fb/c/user_data");
        assert_eq!(right.as_str(), "a/b%2Fc/user_data");
    }

    #[test]
    fn test_key_escapes_percent() {
        assert_ne!(RecordKey::new("a%2Fb", "c"), RecordKey::new("a/b", "c"));
        assert_eq!(RecordKey::new("100%", "x").as_str(), "100%25/x/user_data");
    }

    #[tokio::test]
    async fn test_load_missing_returns_empty_record() {
        let store = RecordStore::new(InMemoryKvStore::new());
        let record = store.load(&RecordKey::new("Ava", "nobody")).await.unwrap();
        assert_eq!(record, ParticipantRecord::default());
        assert_eq!(store.kv().write_count(), 0);
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let store = RecordStore::new(InMemoryKvStore::new());
        let key = RecordKey::new("Ava", "jo");
        let record = ParticipantRecord {
            name: Some("Jo".to_string()),
            location: Some("Seattle".to_string()),
            occupation: None,
        };

        store.save(&key, &record).await.unwrap();
        assert_eq!(store.load(&key).await.unwrap(), record);
        assert_eq!(
            store.kv().get(key.as_str()).await.unwrap(),
            Some(serde_json::json!({"name": "Jo", "location": "Seattle"}))
        );
    }

    #[tokio::test]
    async fn test_load_rejects_foreign_value() {
        let kv = InMemoryKvStore::new();
        kv.set("Ava/jo/user_data", &serde_json::json!(["not", "a", "record"]))
            .await
            .unwrap();
        let store = RecordStore::new(kv);

        let err = store.load(&RecordKey::new("Ava", "jo")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidValue { .. }));
    }

    #[tokio::test]
    async fn test_load_rejects_mistyped_field() {
        let kv = InMemoryKvStore::new();
        kv.set("Ava/jo/user_data", &serde_json::json!({"name": 7}))
            .await
            .unwrap();
        let store = RecordStore::new(kv);

        let err = store.load(&RecordKey::new("Ava", "jo")).await.unwrap_err();
        assert!(err.to_string().contains("Ava/jo/user_data"));
    }

    #[tokio::test]
    async fn test_load_null_value_is_empty_record() {
        let kv = InMemoryKvStore::new();
        kv.set("Ava/jo/user_data", &serde_json::Value::Null).await.unwrap();
        let store = RecordStore::new(kv);

        let record = store.load(&RecordKey::new("Ava", "jo")).await.unwrap();
        assert_eq!(record, ParticipantRecord::default());
    }
}
