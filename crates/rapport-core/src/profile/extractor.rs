//! Participant profile extraction via LLM.
//!
//! `ProfileExtractor` renders the extraction prompt, makes one LLM call,
//! parses the reply into an [`ExtractionResult`], merges it into the prior
//! record and writes the record back only when it changed.
//!
//! Unusable model output is an expected outcome: it is logged and reported as
//! [`SkipReason::Malformed`], never as an error. Provider and store failures
//! propagate as [`ProfileError`].

use tracing::{Instrument, debug, info, info_span, warn};

use rapport_types::config::ProfileConfig;
use rapport_types::conversation::ConversationState;
use rapport_types::error::{ParseError, ProfileError};
use rapport_types::llm::{CompletionRequest, LlmError, Message, MessageRole};
use rapport_types::profile::{ExtractionResult, ParticipantRecord, ProfileField};

use crate::llm::box_provider::BoxLlmProvider;
use crate::storage::kv_store::KvStore;

use super::gate::ProfileState;
use super::parse::parse_extraction;
use super::prompt::render_extraction_prompt;
use super::store::{RecordKey, RecordStore};

/// Why an evaluation left the stored record untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The conversation carries no participant identity.
    NoParticipant,
    /// The record was already complete; no model call was made.
    AlreadyComplete,
    /// The model reply could not be parsed into an extraction result.
    Malformed(ParseError),
    /// The reply parsed but added nothing to the prior record.
    NothingNew,
}

/// Result of one extraction-and-merge pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The merged record differed from the prior one and was saved.
    Updated {
        record: ParticipantRecord,
        state: ProfileState,
    },
    /// No store write happened.
    Unchanged(SkipReason),
}

impl ExtractionOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, ExtractionOutcome::Updated { .. })
    }
}

/// Merge newly extracted values into a copy of `prior`.
///
/// Only non-null values that are non-empty after trimming are taken, so a
/// known field is never cleared or blanked by a later extraction.
pub fn merge_extraction(prior: &ParticipantRecord, extracted: &ExtractionResult) -> ParticipantRecord {
    let mut merged = prior.clone();
    for field in ProfileField::ALL {
        if let Some(value) = extracted.field(field).map(str::trim).filter(|v| !v.is_empty()) {
            *merged.field_mut(field) = Some(value.to_string());
        }
    }
    merged
}

/// Extraction-and-merge engine for participant records.
pub struct ProfileExtractor<S> {
    provider: BoxLlmProvider,
    store: RecordStore<S>,
    config: ProfileConfig,
}

impl<S: KvStore> ProfileExtractor<S> {
    pub fn new(provider: BoxLlmProvider, store: RecordStore<S>, config: ProfileConfig) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    fn build_request(&self, state: &ConversationState) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            model_class: self.config.model_class,
            messages: vec![Message {
                role: MessageRole::User,
                content: render_extraction_prompt(state, self.config.recent_message_limit),
            }],
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
        }
    }

    /// Ask the model for candidate facts about the current participant.
    ///
    /// The outer `Result` is the provider call; the inner one is the parse of
    /// its reply.
    pub async fn extract(
        &self,
        state: &ConversationState,
    ) -> Result<Result<ExtractionResult, ParseError>, LlmError> {
        let request = self.build_request(state);

        let span = info_span!(
            "gen_ai.extract_profile",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.model_class = %request.model_class,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            message_count = state.recent_messages.len(),
        );

        let response = self.provider.complete(&request).instrument(span).await?;
        Ok(parse_extraction(&response.content).inspect_err(|e| {
            let content = response.content.trim();
            let preview_end = content
                .char_indices()
                .nth(200)
                .map_or(content.len(), |(i, _)| i);
            warn!(
                error = %e,
                content_preview = &content[..preview_end],
                "Failed to parse profile extraction reply; treating as no new information"
            );
        }))
    }

    /// Extract from the conversation and merge into `prior`.
    ///
    /// Makes at most one LLM call and at most one store write. The write only
    /// happens when the merged record differs from `prior`.
    #[tracing::instrument(
        name = "extract_and_merge",
        skip(self, state, prior),
        fields(agent = %state.agent_name, participant = ?state.participant())
    )]
    pub async fn extract_and_merge(
        &self,
        state: &ConversationState,
        prior: &ParticipantRecord,
    ) -> Result<ExtractionOutcome, ProfileError> {
        let Some(participant) = state.participant() else {
            return Ok(ExtractionOutcome::Unchanged(SkipReason::NoParticipant));
        };
        let key = RecordKey::new(&state.agent_name, participant);

        let extracted = match self.extract(state).await? {
            Ok(extracted) => extracted,
            Err(e) => return Ok(ExtractionOutcome::Unchanged(SkipReason::Malformed(e))),
        };

        if extracted.is_empty() {
            debug!(key = %key, "Model asserted no facts; skipping merge");
            return Ok(ExtractionOutcome::Unchanged(SkipReason::NothingNew));
        }

        let merged = merge_extraction(prior, &extracted);
        if merged == *prior {
            debug!(key = %key, "Extraction added nothing new; skipping write");
            return Ok(ExtractionOutcome::Unchanged(SkipReason::NothingNew));
        }

        self.store.save(&key, &merged).await?;

        let profile_state = ProfileState::of(&merged);
        info!(key = %key, state = ?profile_state, "Participant record updated");
        Ok(ExtractionOutcome::Updated {
            record: merged,
            state: profile_state,
        })
    }
}
