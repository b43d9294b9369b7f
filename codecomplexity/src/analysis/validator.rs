//! Structural checks for model output.
//!
//! Neither check judges whether the analysis is correct, only whether it has
//! the shape the client expects.

use serde_json::{Map, Value};

use super::types::{ComplexityReport, Validation};
use crate::llm::prompts::{REQUIRED_FIELDS, REQUIRED_HEADINGS};

/// Locate the outermost `{ ... }` span, parse it, and require every report field.
///
/// Text before the first `{` or after the last `}` is ignored, so prose or code
/// fences around the object are tolerated. Anything short of a complete,
/// well-typed report is invalid.
pub fn validate_json_report(text: &str) -> Validation<ComplexityReport> {
    let Some(candidate) = json_object_span(text) else {
        return Validation::Invalid("no JSON object found in response".to_string());
    };

    let object: Map<String, Value> = match serde_json::from_str(candidate) {
        Ok(object) => object,
        Err(e) => return Validation::Invalid(format!("JSON decode error: {e}")),
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Validation::Invalid(format!("missing fields: {}", missing.join(", ")));
    }

    match serde_json::from_value::<ComplexityReport>(Value::Object(object)) {
        Ok(report) => Validation::Valid(report),
        Err(e) => Validation::Invalid(format!("fields have unexpected types: {e}")),
    }
}

/// True when every required Markdown heading appears somewhere in `text`.
pub fn has_required_sections(text: &str) -> bool {
    REQUIRED_HEADINGS.iter().all(|heading| text.contains(heading))
}

/// Markdown check with the tagged result used by the analysis flow.
pub fn validate_markdown(text: &str) -> Validation<&str> {
    let missing: Vec<&str> = REQUIRED_HEADINGS
        .iter()
        .copied()
        .filter(|heading| !text.contains(heading))
        .collect();

    if missing.is_empty() {
        Validation::Valid(text)
    } else {
        Validation::Invalid(format!("missing headings: {}", missing.join(", ")))
    }
}

fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
