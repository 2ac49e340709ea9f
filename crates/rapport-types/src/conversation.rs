//! Conversation state handed over by the host runtime.
//!
//! The host assembles this per inbound turn. Rapport only reads it.

use serde::{Deserialize, Serialize};

/// One message of the conversation, attributed to a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Display name of whoever sent the message (participant or agent).
    pub speaker: String,
    pub text: String,
}

impl ConversationMessage {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Snapshot of a conversation at the time of an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Name of the agent whose namespace owns the records.
    pub agent_name: String,
    /// Identifier of the participant who sent the current message, if known.
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Messages in chronological order, oldest first.
    #[serde(default)]
    pub recent_messages: Vec<ConversationMessage>,
}

impl ConversationState {
    pub fn new(agent_name: impl Into<String>, sender_name: Option<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            sender_name,
            recent_messages: Vec::new(),
        }
    }

    /// Append a message and return `self` for chaining.
    pub fn with_message(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.recent_messages
            .push(ConversationMessage::new(speaker, text));
        self
    }

    /// The participant identifier, treating a blank name as absent.
    pub fn participant(&self) -> Option<&str> {
        self.sender_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Render the last `limit` messages as `speaker: text` lines.
    pub fn format_recent_messages(&self, limit: usize) -> String {
        let skip = self.recent_messages.len().saturating_sub(limit);
        self.recent_messages
            .iter()
            .skip(skip)
            .map(|m| format!("{}: {}", m.speaker, m.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_blank_is_none() {
        let state = ConversationState::new("Ava", Some("  ".to_string()));
        assert!(state.participant().is_none());

        let state = ConversationState::new("Ava", None);
        assert!(state.participant().is_none());

        let state = ConversationState::new("Ava", Some("jo".to_string()));
        assert_eq!(state.participant(), Some("jo"));
    }

    #[test]
    fn test_format_recent_messages_keeps_tail() {
        let state = ConversationState::new("Ava", Some("jo".to_string()))
            .with_message("Ava", "What brought you to Seattle?")
            .with_message("jo", "I moved here when I started my job as an architect")
            .with_message("Ava", "Nice!");

        assert_eq!(
            state.format_recent_messages(2),
            "jo: I moved here when I started my job as an architect\nAva: Nice!"
        );
        assert_eq!(state.format_recent_messages(10).lines().count(), 3);
        assert_eq!(state.format_recent_messages(0), "");
    }
}
