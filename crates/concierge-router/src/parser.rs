//! Parse and validate the classifier's model output

use crate::error::ClassificationError;
use concierge_domain::{Intent, RoutingDecision};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const FENCE: &str = "```";

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```[a-z]*").expect("fence regex is valid"))
}

/// Remove Markdown code-fence markers from fenced output
///
/// Only output that begins with a fence is touched; every fence marker (with
/// an optional lowercase language tag) is removed and the rest trimmed.
/// Unfenced output is returned unchanged.
pub fn strip_code_fence(raw: &str) -> String {
    if !raw.trim_start().starts_with(FENCE) {
        return raw.to_string();
    }
    fence_regex().replace_all(raw, "").trim().to_string()
}

/// Parse the model's answer to the routing prompt
///
/// Expects a JSON object with string keys `Category` and `Reasoning` (a
/// missing key reads as empty). Both values are trimmed; the category must be
/// one of the three wire labels exactly.
pub fn parse_routing_output(raw: &str) -> Result<RoutingDecision, ClassificationError> {
    let json_str = strip_code_fence(raw);

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ClassificationError::MalformedOutput(e.to_string()))?;

    let object = json.as_object().ok_or_else(|| {
        ClassificationError::MalformedOutput("expected a JSON object".to_string())
    })?;

    let category = string_field(object, "Category")?;
    let reasoning = string_field(object, "Reasoning")?;

    let category = category.trim();
    let intent = Intent::parse(category)
        .ok_or_else(|| ClassificationError::UnexpectedCategory(category.to_string()))?;

    Ok(RoutingDecision::new(intent, reasoning.trim()))
}

fn string_field<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, ClassificationError> {
    match object.get(key) {
        None => Ok(""),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(ClassificationError::MalformedOutput(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
    }
}
