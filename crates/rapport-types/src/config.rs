//! Configuration types for Rapport.
//!
//! `ProfileConfig` is the `config.toml` that tunes the extraction call and
//! the conversation window handed to the model.

use serde::{Deserialize, Serialize};

use crate::llm::ModelClass;

/// Settings for participant profile extraction.
///
/// Loaded from `~/.rapport/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Model identifier. Empty lets the provider choose based on `model_class`.
    #[serde(default)]
    pub model: String,

    /// Size hint for the extraction model.
    #[serde(default)]
    pub model_class: ModelClass,

    /// Output token cap for the extraction call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for the extraction call.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Number of most recent messages rendered into the prompt.
    #[serde(default = "default_recent_message_limit")]
    pub recent_message_limit: usize,
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f64 {
    0.0
}

fn default_recent_message_limit() -> usize {
    20
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            model_class: ModelClass::default(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            recent_message_limit: default_recent_message_limit(),
        }
    }
}
