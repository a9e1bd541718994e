//! Response Normalizer: turns a free-text completion into validated `QaRecord`s.
//!
//! Steps: trim → strip fence/language markers → take first `[` .. last `]` →
//! parse JSON → check every element is `{question, answer}`.
//! Any failure rejects the whole payload; no partial records are returned.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::models::interview::QaRecord;

static FENCE_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(json|```|`)").expect("fence marker pattern is valid"));

// Greedy and dot-matches-newline: spans from the first `[` to the last `]`.
static ARRAY_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern is valid"));

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("No JSON array found in response")]
    NoArrayFound,

    #[error("Invalid JSON format: {0}")]
    MalformedPayload(String),
}

/// Extracts and validates the question/answer array from raw model output.
pub fn normalize_response(raw: &str) -> Result<Vec<QaRecord>, NormalizeError> {
    let payload = extract_array(raw)?;

    let parsed: Value = serde_json::from_str(&payload)
        .map_err(|e| NormalizeError::MalformedPayload(e.to_string()))?;

    validate_records(parsed)
}

/// Steps 1–3: returns the candidate array text.
fn extract_array(raw: &str) -> Result<String, NormalizeError> {
    let cleaned = FENCE_MARKERS.replace_all(raw.trim(), "");
    ARRAY_SPAN
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
        .ok_or(NormalizeError::NoArrayFound)
}

fn validate_records(parsed: Value) -> Result<Vec<QaRecord>, NormalizeError> {
    let Value::Array(items) = parsed else {
        return Err(NormalizeError::MalformedPayload(
            "expected a JSON array".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(NormalizeError::MalformedPayload(format!(
                    "element {index} is not an object"
                )));
            }
            serde_json::from_value::<QaRecord>(item)
                .map_err(|e| NormalizeError::MalformedPayload(format!("element {index}: {e}")))
        })
        .collect()
}
