//! Extraction prompt template and rendering.
//!
//! `compose_context` is a pure placeholder substitution; the template text
//! itself is a prompt-quality concern and only checked for its contract
//! (placeholders present, reply shape documented).

use rapport_types::conversation::ConversationState;

/// Placeholder for the rendered evaluation examples.
pub const EXAMPLES_PLACEHOLDER: &str = "evaluationExamples";

/// Placeholder for the recent conversation text.
pub const MESSAGES_PLACEHOLDER: &str = "recentMessages";

/// Task description sent to the model for every extraction.
pub const EXTRACTION_TEMPLATE: &str = r#"
TASK: Extract user information from the conversation.

EXAMPLES:
{{evaluationExamples}}

INSTRUCTIONS:
Extract any clearly stated user information from the conversation:
- Only extract information that is explicitly stated
- Skip ambiguous or unclear information
- If multiple possibilities exist, do not extract
- Use null for anything you cannot determine with confidence

Recent Messages:
{{recentMessages}}

Response should be a JSON object in a markdown block:
```json
{
    "name": string | null,
    "location": string | null,
    "occupation": string | null
}
```"#;

/// A worked example shown to the model.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationExample {
    pub context: &'static str,
    /// `(speaker, text)` pairs in order.
    pub messages: &'static [(&'static str, &'static str)],
    pub outcome: &'static str,
}

/// Introduction, implied location, and an ambiguous negative case.
pub const EVALUATION_EXAMPLES: [EvaluationExample; 3] = [
    EvaluationExample {
        context: "New user introduction",
        messages: &[("User", "Hi, I'm David Chen. I work as a nurse in Toronto.")],
        outcome: r#"{"name": "David Chen", "location": "Toronto", "occupation": "nurse"}"#,
    },
    EvaluationExample {
        context: "Casual conversation",
        messages: &[
            ("Bot", "What brought you to Seattle?"),
            ("User", "I moved here when I started my job as an architect"),
        ],
        outcome: r#"{"name": null, "location": "Seattle", "occupation": "architect"}"#,
    },
    EvaluationExample {
        context: "Ambiguous information (negative example)",
        messages: &[("User", "My friend Sarah and I both work in marketing")],
        outcome: r#"{"name": null, "location": null, "occupation": null}"#,
    },
];

/// Render examples as numbered blocks of context, messages and outcome.
pub fn format_examples(examples: &[EvaluationExample]) -> String {
    examples
        .iter()
        .enumerate()
        .map(|(i, example)| {
            let messages = example
                .messages
                .iter()
                .map(|(speaker, text)| format!("{speaker}: {text}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "Example {}:\nContext: {}\nMessages:\n{}\nOutcome:\n{}",
                i + 1,
                example.context,
                messages,
                example.outcome
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Replace every `{{key}}` in `template` with its value.
///
/// Substitution is single-pass: text inserted for one placeholder is never
/// scanned again. Placeholders without a value are left as written.
pub fn compose_context(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = after[..end].trim();
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Build the full extraction prompt for the current conversation.
pub fn render_extraction_prompt(state: &ConversationState, recent_message_limit: usize) -> String {
    let examples = format_examples(&EVALUATION_EXAMPLES);
    let messages = state.format_recent_messages(recent_message_limit);
    compose_context(
        EXTRACTION_TEMPLATE,
        &[
            (EXAMPLES_PLACEHOLDER, examples.as_str()),
            (MESSAGES_PLACEHOLDER, messages.as_str()),
        ],
    )
}
