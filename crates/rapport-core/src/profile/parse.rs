//! Model reply parsing.
//!
//! Turns raw model text into a validated [`ExtractionResult`]. The canonical
//! reply embeds exactly one fenced block labelled `json`. A reply whose whole
//! body is a JSON object (providers with structured output) is accepted as-is.
//! Anything else is a [`ParseError`], never a panic or an upstream error.

use rapport_types::error::ParseError;
use rapport_types::profile::ExtractionResult;

const FENCE: &str = "```";

/// Parse and validate a model reply.
pub fn parse_extraction(content: &str) -> Result<ExtractionResult, ParseError> {
    let payload = match find_json_blocks(content)?.as_slice() {
        [block] => *block,
        [] => bare_object(content).ok_or(ParseError::MissingBlock)?,
        blocks => {
            return Err(ParseError::InvalidShape(format!(
                "expected exactly one json block, found {}",
                blocks.len()
            )));
        }
    };

    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    if !value.is_object() {
        return Err(ParseError::InvalidShape(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| ParseError::InvalidShape(e.to_string()))
}

/// Bodies of every fenced block whose info string is `json`.
///
/// An opening `json` fence without a closing fence is malformed output.
fn find_json_blocks(content: &str) -> Result<Vec<&str>, ParseError> {
    let mut blocks = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find(FENCE) {
        let after_fence = &rest[open + FENCE.len()..];
        let (info, body) = match after_fence.find('\n') {
            Some(nl) => (&after_fence[..nl], &after_fence[nl + 1..]),
            None => (after_fence, ""),
        };
        let Some(close) = body.find(FENCE) else {
            if info.trim().eq_ignore_ascii_case("json") {
                return Err(ParseError::InvalidJson("unterminated json block".to_string()));
            }
            break;
        };
        if info.trim().eq_ignore_ascii_case("json") {
            blocks.push(body[..close].trim());
        }
        rest = &body[close + FENCE.len()..];
    }

    Ok(blocks)
}

fn bare_object(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}')).then_some(trimmed)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
