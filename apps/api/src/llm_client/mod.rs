/// LLM Client — the single point of entry for all Gemini API calls in Vitae.
///
/// No other module may call the text-generation provider directly.
/// One request per call: no retry, no backoff, transport-default timeout.
///
/// Model: gemini-2.0-flash (hardcoded, not configurable)
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// The model used for all generation calls in Vitae.
pub const MODEL: &str = "gemini-2.0-flash";
/// Environment variable holding the provider credential. Read on every call.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} is not set")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Gemini API returned a non-JSON body: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// The single generation client used by all services in Vitae.
/// Returns the provider envelope untouched; shape handling lives in
/// `enhance::normalize`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key_var: String,
}

impl LlmClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_key_var(base_url, API_KEY_VAR)
    }

    /// Builds a client that reads its credential from `api_key_var` instead
    /// of `GEMINI_API_KEY`.
    pub fn with_key_var(base_url: impl Into<String>, api_key_var: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_var: api_key_var.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url)
    }

    /// Whether a credential is currently present in the environment.
    pub fn has_credential(&self) -> bool {
        self.api_key().is_ok()
    }

    fn api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingCredential(self.api_key_var.clone()))
    }

    /// Sends one prompt to the provider and returns the parsed JSON envelope.
    ///
    /// The credential check happens before any network I/O.
    pub async fn generate(&self, prompt: &str) -> Result<Value, LlmError> {
        let api_key = self.api_key()?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = MODEL, prompt_chars = prompt.len(), "Sending prompt to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Gemini API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = serde_json::from_str(&body)?;
        debug!("Gemini call succeeded");
        Ok(envelope)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}
