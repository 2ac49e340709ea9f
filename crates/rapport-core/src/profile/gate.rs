//! Completion gate.
//!
//! Cheap, pure checks run before any model call. Once a record is complete
//! the participant leaves the extraction loop for good.

use serde::{Deserialize, Serialize};

use rapport_types::profile::{ParticipantRecord, ProfileField};

/// Extraction state of one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileState {
    Incomplete,
    Complete,
}

impl ProfileState {
    pub fn of(record: &ParticipantRecord) -> Self {
        if is_complete(record) {
            ProfileState::Complete
        } else {
            ProfileState::Incomplete
        }
    }
}

/// True iff every tracked field holds a non-empty value.
pub fn is_complete(record: &ParticipantRecord) -> bool {
    ProfileField::ALL.iter().all(|f| record.is_known(*f))
}

/// Whether another extraction attempt is warranted.
pub fn should_extract(record: &ParticipantRecord) -> bool {
    !is_complete(record)
}
