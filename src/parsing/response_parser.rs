use crate::error::{Error, Result};
use crate::types::analysis_data::{AnalysisResponse, LabeledFragment};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("valid fence regex"))
}

fn bare_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("valid fence regex"))
}

/// Pulls the JSON payload out of model text: a ```` ```json ```` fence, a
/// bare fence, or the span from the first `{` to the last `}`.
pub fn extract_json_block(content: &str) -> Option<&str> {
    if let Some(caps) = json_fence().captures(content) {
        return caps.get(1).map(|m| m.as_str());
    }
    if let Some(caps) = bare_fence().captures(content) {
        return caps.get(1).map(|m| m.as_str());
    }
    let open = content.find('{')?;
    let close = content.rfind('}')?;
    (open < close).then(|| &content[open..=close])
}

/// Reads the `components` array leniently. Anything other than an array
/// yields `None`; entries without a string `type` and `text` are skipped.
fn parse_components(value: &Value) -> Option<Vec<LabeledFragment>> {
    let entries = value.get("components")?.as_array()?;
    let mut fragments = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let kind = entry.get("type").and_then(Value::as_str);
        let text = entry.get("text").and_then(Value::as_str);
        match (kind, text) {
            (Some(kind), Some(text)) => fragments.push(LabeledFragment {
                kind: kind.to_string(),
                text: text.to_string(),
                role: entry
                    .get("role")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            _ => log::warn!("Skipping malformed component #{}: {}", index, entry),
        }
    }
    Some(fragments)
}

/// Turns the model's message text into a response for `sentence`.
///
/// Never fails: content without usable JSON becomes a raw-only response.
pub fn parse_completion_content(sentence: &str, content: &str) -> AnalysisResponse {
    let raw_only = || AnalysisResponse {
        sentence: sentence.to_string(),
        components: None,
        raw_response: Some(content.to_string()),
    };

    let Some(block) = extract_json_block(content) else {
        log::warn!("Model response holds no JSON; keeping raw text");
        return raw_only();
    };
    let value: Value = match serde_json::from_str(block) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Model JSON did not parse ({}); keeping raw text", e);
            return raw_only();
        }
    };

    match parse_components(&value) {
        Some(components) => AnalysisResponse {
            sentence: sentence.to_string(),
            components: Some(components),
            raw_response: None,
        },
        None => {
            log::warn!("Model JSON has no components array; keeping raw text");
            raw_only()
        }
    }
}

/// Reads a response saved as JSON, e.g. by `sentence-lens analyze --json`.
/// The `sentence` field is required; `components` is read leniently.
pub fn parse_saved_response(content: &str) -> Result<AnalysisResponse> {
    let value: Value = serde_json::from_str(content)?;
    let sentence = value
        .get("sentence")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_input("saved response has no \"sentence\" string"))?;
    Ok(AnalysisResponse {
        sentence: sentence.to_string(),
        components: parse_components(&value),
        raw_response: value
            .get("rawResponse")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
