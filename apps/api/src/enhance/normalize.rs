//! Response normalization — turns the provider envelope into the text (or
//! draft) the caller receives.

use serde::Deserialize;
use serde_json::Value;

use crate::enhance::error::EnhanceError;
use crate::enhance::models::{DraftResponse, Field};
use crate::llm_client::strip_json_fences;

/// Upper bound on terms returned for the `skills` field.
pub const MAX_SKILLS: usize = 5;

/// Extracts `candidates[0].content.parts[0].text` from a Gemini envelope.
pub fn extract_completion_text(envelope: &Value) -> Result<&str, EnhanceError> {
    let path = ["candidates", "0", "content", "parts", "0", "text"];
    let mut node = envelope;
    for (depth, segment) in path.iter().enumerate() {
        let next = match segment.parse::<usize>() {
            Ok(index) => node.get(index),
            Err(_) => node.get(*segment),
        };
        node = next.ok_or_else(|| {
            EnhanceError::MalformedUpstreamResponse(format!(
                "missing `{}` in provider response",
                path[..=depth].join(".")
            ))
        })?;
    }
    node.as_str().ok_or_else(|| {
        EnhanceError::MalformedUpstreamResponse(
            "`candidates.0.content.parts.0.text` is not a string".to_string(),
        )
    })
}

/// Splits a comma-separated list into trimmed, non-empty terms.
pub fn split_terms(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cleans a skills completion down to at most [`MAX_SKILLS`] terms.
/// Text without a comma is returned trimmed; shorter lists are never padded.
pub fn normalize_skills(text: &str) -> String {
    let text = text.trim();
    if !text.contains(',') {
        return text.to_string();
    }
    let mut terms = split_terms(text);
    terms.truncate(MAX_SKILLS);
    terms.join(", ")
}

/// Produces the final `text` for an enhancement request.
pub fn normalize_enhancement(field: Field, envelope: &Value) -> Result<String, EnhanceError> {
    let text = extract_completion_text(envelope)?;
    Ok(match field {
        Field::Skills => normalize_skills(text),
        Field::Summary | Field::Experience => text.trim().to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct RawDraft {
    summary: String,
    description: String,
    skills: RawSkills,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSkills {
    List(Vec<String>),
    Joined(String),
}

/// Parses the JSON object a draft prompt asks the model to return.
pub fn normalize_draft(envelope: &Value) -> Result<DraftResponse, EnhanceError> {
    let text = extract_completion_text(envelope)?;
    let raw: RawDraft = serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        EnhanceError::MalformedUpstreamResponse(format!("draft is not the expected JSON: {e}"))
    })?;

    let skills = match raw.skills {
        RawSkills::Joined(joined) => split_terms(&joined),
        RawSkills::List(list) => list
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    };

    Ok(DraftResponse {
        summary: raw.summary.trim().to_string(),
        description: raw.description.trim().to_string(),
        skills,
    })
}
