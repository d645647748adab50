use serde_json::Value;

use super::error::ExtractError;
use super::prompt::RESULT_SECTIONS;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Remove a leading "```json" marker and a trailing "```" marker, if present.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix(JSON_FENCE_OPEN).unwrap_or(text);
    text.strip_suffix(FENCE_CLOSE).unwrap_or(text)
}

pub fn parse_model_output(text: &str) -> Result<Value, ExtractError> {
    Ok(serde_json::from_str(strip_code_fences(text))?)
}

/// Sections of the requested result shape missing from `value`. Returned
/// values are never rejected because of this; callers only log it.
pub fn missing_sections(value: &Value) -> Vec<&'static str> {
    RESULT_SECTIONS
        .iter()
        .copied()
        .filter(|section| !value.get(section).is_some_and(Value::is_array))
        .collect()
}
