use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enhance::error::EnhanceError;

/// Value substituted for any profile fact the caller left out.
pub const MISSING_CONTEXT: &str = "N/A";

/// The résumé sections that can be rewritten by the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Summary,
    Experience,
    Skills,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Summary => "summary",
            Field::Experience => "experience",
            Field::Skills => "skills",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Field::Summary),
            "experience" => Ok(Field::Experience),
            "skills" => Ok(Field::Skills),
            other => Err(EnhanceError::InvalidField(other.to_string())),
        }
    }
}

/// Optional profile facts used to personalize a prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContext {
    pub full_name: Option<String>,
    pub current_position: Option<String>,
    pub industry: Option<String>,
}

impl ProfileContext {
    pub fn full_name(&self) -> &str {
        or_missing(&self.full_name)
    }

    pub fn current_position(&self) -> &str {
        or_missing(&self.current_position)
    }

    pub fn industry(&self) -> &str {
        or_missing(&self.industry)
    }
}

fn or_missing(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING_CONTEXT)
}

/// Body of `POST /api/v1/enhance`.
///
/// `field` stays a raw string so an unknown value surfaces as
/// `InvalidField` rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub field: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub context: Option<ProfileContext>,
    pub additional_instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhanceResponse {
    pub text: String,
}

/// Body of `POST /api/v1/generate`: basic profile facts for a full first draft.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftRequest {
    pub full_name: String,
    pub current_position: String,
    pub years_of_experience: String,
    pub industry: String,
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftResponse {
    pub summary: String,
    pub description: String,
    pub skills: Vec<String>,
}
