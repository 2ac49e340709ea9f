//! LlmProvider trait definition.
//!
//! This is the text-generation seam. Rapport treats the provider as opaque:
//! a prompt goes in, text comes out.

use rapport_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Network,
/// timeout and quota handling belong to the implementation; failures are
/// reported as `LlmError` and never retried by callers in this crate.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
