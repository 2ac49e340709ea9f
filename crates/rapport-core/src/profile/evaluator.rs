//! Host-facing profile evaluator.
//!
//! The host calls [`ProfileEvaluator::validate`] (or just
//! [`ProfileEvaluator::evaluate`]) once per inbound turn and
//! [`ProfileEvaluator::status`] when composing the agent's context.
//! The completion gate runs before the engine, so a complete record never
//! costs a model call.

use tracing::debug;

use rapport_types::conversation::ConversationState;
use rapport_types::error::ProfileError;
use rapport_types::profile::ParticipantRecord;

use crate::storage::kv_store::KvStore;

use super::extractor::{ExtractionOutcome, ProfileExtractor, SkipReason};
use super::gate::should_extract;
use super::status::format_status;
use super::store::RecordKey;

pub struct ProfileEvaluator<S> {
    extractor: ProfileExtractor<S>,
}

impl<S: KvStore> ProfileEvaluator<S> {
    pub fn new(extractor: ProfileExtractor<S>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &ProfileExtractor<S> {
        &self.extractor
    }

    fn key_for(state: &ConversationState) -> Option<RecordKey> {
        state
            .participant()
            .map(|participant| RecordKey::new(&state.agent_name, participant))
    }

    /// Load the current record for the conversation's participant.
    pub async fn record(
        &self,
        state: &ConversationState,
    ) -> Result<Option<ParticipantRecord>, ProfileError> {
        match Self::key_for(state) {
            Some(key) => Ok(Some(self.extractor.store().load(&key).await?)),
            None => Ok(None),
        }
    }

    /// Whether this turn should run extraction at all.
    pub async fn validate(&self, state: &ConversationState) -> Result<bool, ProfileError> {
        Ok(self
            .record(state)
            .await?
            .is_some_and(|record| should_extract(&record)))
    }

    /// Run the full pipeline for one turn: identity, load, gate, extract, merge.
    #[tracing::instrument(
        name = "evaluate_profile",
        skip(self, state),
        fields(agent = %state.agent_name, participant = ?state.participant())
    )]
    pub async fn evaluate(
        &self,
        state: &ConversationState,
    ) -> Result<ExtractionOutcome, ProfileError> {
        let Some(prior) = self.record(state).await? else {
            debug!("No participant identity; skipping extraction");
            return Ok(ExtractionOutcome::Unchanged(SkipReason::NoParticipant));
        };

        if !should_extract(&prior) {
            debug!("Record already complete; skipping extraction");
            return Ok(ExtractionOutcome::Unchanged(SkipReason::AlreadyComplete));
        }

        self.extractor.extract_and_merge(state, &prior).await
    }

    /// Status block for the participant, or an empty string without one.
    pub async fn status(&self, state: &ConversationState) -> Result<String, ProfileError> {
        Ok(self
            .record(state)
            .await?
            .map(|record| format_status(&record))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rapport_types::config::ProfileConfig;
    use rapport_types::error::RepositoryError;

    use super::*;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::profile::extractor::tests::{ScriptedProvider, UnreachableStore, fenced};
    use crate::profile::gate::ProfileState;
    use crate::profile::store::RecordStore;
    use crate::storage::memory::InMemoryKvStore;

    fn evaluator(
        provider: &ScriptedProvider,
        kv: Arc<InMemoryKvStore>,
    ) -> ProfileEvaluator<Arc<InMemoryKvStore>> {
        ProfileEvaluator::new(ProfileExtractor::new(
            BoxLlmProvider::new(provider.clone()),
            RecordStore::new(kv),
            ProfileConfig::default(),
        ))
    }

    fn jo_state() -> ConversationState {
        ConversationState::new("Ava", Some("jo".to_string()))
            .with_message("jo", "Hi, I'm Jo. I'm an architect in Seattle.")
    }

    #[tokio::test]
    async fn test_complete_record_never_reaches_model() {
        let provider = ScriptedProvider::replying(&fenced(r#"{"name": "Someone Else"}"#));
        let kv = Arc::new(InMemoryKvStore::new());
        let evaluator = evaluator(&provider, kv.clone());
        let complete = ParticipantRecord {
            name: Some("Jo".to_string()),
            location: Some("Seattle".to_string()),
            occupation: Some("architect".to_string()),
        };
        evaluator
            .extractor()
            .store()
            .save(&RecordKey::new("Ava", "jo"), &complete)
            .await
            .unwrap();

        assert!(!evaluator.validate(&jo_state()).await.unwrap());
        let outcome = evaluator.evaluate(&jo_state()).await.unwrap();

        assert_eq!(outcome, ExtractionOutcome::Unchanged(SkipReason::AlreadyComplete));
        assert_eq!(provider.calls(), 0);
        assert_eq!(kv.write_count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_record_runs_extraction() {
        let provider = ScriptedProvider::replying(&fenced(
            r#"{"name": "Jo", "location": "Seattle", "occupation": null}"#,
        ));
        let kv = Arc::new(InMemoryKvStore::new());
        let evaluator = evaluator(&provider, kv.clone());

        assert!(evaluator.validate(&jo_state()).await.unwrap());
        let outcome = evaluator.evaluate(&jo_state()).await.unwrap();

        let ExtractionOutcome::Updated { record, state } = outcome else {
            panic!("expected an update, got {outcome:?}");
        };
        assert_eq!(state, ProfileState::Incomplete);
        assert_eq!(record.occupation, None);
        assert_eq!(provider.calls(), 1);
        assert_eq!(kv.write_count(), 1);
    }

    #[tokio::test]
    async fn test_record_completes_over_turns_then_stops() {
        let kv = Arc::new(InMemoryKvStore::new());

        let first = ScriptedProvider::replying(&fenced(r#"{"name": "Jo"}"#));
        let evaluator_a = evaluator(&first, kv.clone());
        let outcome = evaluator_a.evaluate(&jo_state()).await.unwrap();
        assert!(outcome.is_updated());

        let second = ScriptedProvider::replying(&fenced(
            r#"{"name": null, "location": "Seattle", "occupation": "architect"}"#,
        ));
        let evaluator_b = evaluator(&second, kv.clone());
        let outcome = evaluator_b.evaluate(&jo_state()).await.unwrap();
        assert!(matches!(
            outcome,
            ExtractionOutcome::Updated { state: ProfileState::Complete, .. }
        ));

        let outcome = evaluator_b.evaluate(&jo_state()).await.unwrap();
        assert_eq!(outcome, ExtractionOutcome::Unchanged(SkipReason::AlreadyComplete));
        assert_eq!(second.calls(), 1);
        assert_eq!(kv.write_count(), 2);
    }

    #[tokio::test]
    async fn test_no_participant_is_noop() {
        let provider = ScriptedProvider::replying(&fenced(r#"{"name": "Jo"}"#));
        let kv = Arc::new(InMemoryKvStore::new());
        let evaluator = evaluator(&provider, kv.clone());
        let state = ConversationState::new("Ava", None).with_message("?", "I'm Jo");

        assert!(!evaluator.validate(&state).await.unwrap());
        assert_eq!(
            evaluator.evaluate(&state).await.unwrap(),
            ExtractionOutcome::Unchanged(SkipReason::NoParticipant)
        );
        assert_eq!(evaluator.status(&state).await.unwrap(), "");
        assert_eq!(provider.calls(), 0);
        assert!(kv.is_empty());
    }

    #[tokio::test]
    async fn test_status_reflects_stored_record() {
        let provider = ScriptedProvider::replying(&fenced(r#"{"occupation": "architect"}"#));
        let kv = Arc::new(InMemoryKvStore::new());
        let evaluator = evaluator(&provider, kv);

        let before = evaluator.status(&jo_state()).await.unwrap();
        assert!(before.contains("- occupation: need to know"));

        evaluator.evaluate(&jo_state()).await.unwrap();
        let after = evaluator.status(&jo_state()).await.unwrap();
        assert!(after.contains("- Occupation: architect"));
        assert!(!after.contains("- occupation: need to know"));
    }

    #[tokio::test]
    async fn test_store_read_failure_propagates_before_model() {
        let provider = ScriptedProvider::replying(&fenced(r#"{"name": "Jo"}"#));
        let evaluator = ProfileEvaluator::new(ProfileExtractor::new(
            BoxLlmProvider::new(provider.clone()),
            RecordStore::new(UnreachableStore),
            ProfileConfig::default(),
        ));

        let err = evaluator.evaluate(&jo_state()).await.unwrap_err();
        assert!(matches!(err, ProfileError::Store(RepositoryError::Connection)));
        assert!(matches!(
            evaluator.validate(&jo_state()).await,
            Err(ProfileError::Store(_))
        ));
        assert!(matches!(
            evaluator.status(&jo_state()).await,
            Err(ProfileError::Store(_))
        ));
        assert_eq!(provider.calls(), 0);
    }
}
