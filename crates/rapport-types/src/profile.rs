//! Participant profile types.
//!
//! `ParticipantRecord` is the durable knowledge about one participant within
//! one agent's namespace. `ExtractionResult` is the per-turn candidate parsed
//! from model output and merged into the record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked profile attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Location,
    Occupation,
}

impl ProfileField {
    /// Every tracked field, in display order.
    pub const ALL: [ProfileField; 3] = [
        ProfileField::Name,
        ProfileField::Location,
        ProfileField::Occupation,
    ];

    /// JSON key of the field in records and model output.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Location => "location",
            ProfileField::Occupation => "occupation",
        }
    }

    /// Human description of what the field holds.
    pub fn description(self) -> &'static str {
        match self {
            ProfileField::Name => "full name (first and last if mentioned)",
            ProfileField::Location => "city and/or country where they live",
            ProfileField::Occupation => "job title or profession",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Persisted knowledge about one participant.
///
/// Unknown fields are omitted when serialized, so a fresh record is `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

impl ParticipantRecord {
    pub fn field(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Name => self.name.as_deref(),
            ProfileField::Location => self.location.as_deref(),
            ProfileField::Occupation => self.occupation.as_deref(),
        }
    }

    pub fn field_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Location => &mut self.location,
            ProfileField::Occupation => &mut self.occupation,
        }
    }

    /// Whether `field` holds a non-empty value. Empty and absent are the same.
    pub fn is_known(&self, field: ProfileField) -> bool {
        self.field(field).is_some_and(|v| !v.is_empty())
    }
}

/// Candidate facts parsed from one model reply.
///
/// `None` means the model declined to answer for that field. Serialized with
/// explicit `null`s so the emitted shape always carries all three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl ExtractionResult {
    pub fn field(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Name => self.name.as_deref(),
            ProfileField::Location => self.location.as_deref(),
            ProfileField::Occupation => self.occupation.as_deref(),
        }
    }

    /// True when the model asserted nothing for any field.
    pub fn is_empty(&self) -> bool {
        ProfileField::ALL
            .iter()
            .all(|f| self.field(*f).is_none_or(|v| v.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_serializes_as_empty_object() {
        let json = serde_json::to_string(&ParticipantRecord::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_record_deserializes_partial_and_null() {
        let record: ParticipantRecord =
            serde_json::from_str(r#"{"name": "Jo", "location": null}"#).unwrap();
        assert_eq!(record.name.as_deref(), Some("Jo"));
        assert!(record.location.is_none());
        assert!(record.occupation.is_none());
    }

    #[test]
    fn test_is_known_treats_empty_as_absent() {
        let record = ParticipantRecord {
            name: Some(String::new()),
            location: Some("Toronto".to_string()),
            occupation: None,
        };
        assert!(!record.is_known(ProfileField::Name));
        assert!(record.is_known(ProfileField::Location));
        assert!(!record.is_known(ProfileField::Occupation));
    }

    #[test]
    fn test_extraction_result_emits_explicit_nulls() {
        let result = ExtractionResult {
            name: Some("David Chen".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "David Chen", "location": null, "occupation": null})
        );
    }

    #[test]
    fn test_extraction_result_rejects_unknown_fields() {
        let err = serde_json::from_str::<ExtractionResult>(r#"{"name": "Jo", "age": 31}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_extraction_result_rejects_non_string_values() {
        let err = serde_json::from_str::<ExtractionResult>(r#"{"name": 42}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_extraction_result_is_empty() {
        assert!(ExtractionResult::default().is_empty());
        let blank = ExtractionResult {
            occupation: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.is_empty());
        let some = ExtractionResult {
            location: Some("Seattle".to_string()),
            ..Default::default()
        };
        assert!(!some.is_empty());
    }

    #[test]
    fn test_profile_field_keys_and_order() {
        let keys: Vec<&str> = ProfileField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["name", "location", "occupation"]);
        assert_eq!(ProfileField::Occupation.to_string(), "occupation");
    }
}
