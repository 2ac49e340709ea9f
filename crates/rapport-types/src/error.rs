use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in rapport-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("invalid stored value under '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Why a model reply could not be turned into an extraction result.
///
/// These are expected outcomes of a turn, not failures of a dependency:
/// the engine recovers from every variant locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no fenced json block in model output")]
    MissingBlock,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unexpected shape: {0}")]
    InvalidShape(String),
}

/// Errors surfaced by profile extraction.
///
/// Only broken dependencies end up here. Unusable model output is reported
/// through the extraction outcome instead.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("text generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("record store failed: {0}")]
    Store(#[from] RepositoryError),
}
