//! Recover structured data from model text.

use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error)]
#[error("model response is not valid JSON: {source}")]
pub struct ParseError {
    #[source]
    source: serde_json::Error,
}

/// Parse model text as JSON, tolerating one fenced code block wrapper.
///
/// The fence fallback runs only when the direct parse fails: the leading
/// fence and an optional language tag (one alphanumeric word followed by
/// whitespace, e.g. `json`) are dropped together with the trailing fence, and
/// parsing is retried exactly once.
pub fn recover(text: &str) -> Result<Value, ParseError> {
    let first = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    match unfence(text) {
        Some(inner) => serde_json::from_str::<Value>(inner).map_err(|source| ParseError { source }),
        None => Err(ParseError { source: first }),
    }
}

fn unfence(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.len() < FENCE.len() * 2 || !trimmed.starts_with(FENCE) || !trimmed.ends_with(FENCE)
    {
        return None;
    }
    let body = &trimmed[FENCE.len()..trimmed.len() - FENCE.len()];
    // A language tag is a single word on the fence line.
    match body.find(char::is_whitespace) {
        Some(end) if body[..end].chars().all(|c| c.is_ascii_alphanumeric()) => {
            Some(&body[end..])
        }
        _ => Some(body),
    }
}
