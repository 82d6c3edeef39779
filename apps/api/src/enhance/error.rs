use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of an enhancement or draft call. Every variant is terminal for
/// the request and is reported as `500 {error, kind}`.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Invalid field specified: '{0}' (expected summary, experience or skills)")]
    InvalidField(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),
}

impl EnhanceError {
    pub fn kind(&self) -> &'static str {
        match self {
            EnhanceError::InvalidField(_) => "INVALID_FIELD",
            EnhanceError::InvalidRequest(_) => "INVALID_REQUEST",
            EnhanceError::MissingCredential(_) => "MISSING_CREDENTIAL",
            EnhanceError::UpstreamError(_) => "UPSTREAM_ERROR",
            EnhanceError::MalformedUpstreamResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
        }
    }
}

impl From<LlmError> for EnhanceError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential(var) => {
                EnhanceError::MissingCredential(format!("{var} is not set"))
            }
            LlmError::Api { status, body } => EnhanceError::UpstreamError(format!(
                "provider returned status {status}: {}",
                body.trim()
            )),
            LlmError::Transport(e) => {
                EnhanceError::UpstreamError(format!("request to provider failed: {e}"))
            }
            LlmError::Payload(e) => {
                EnhanceError::UpstreamError(format!("provider returned a non-JSON body: {e}"))
            }
        }
    }
}

impl IntoResponse for EnhanceError {
    fn into_response(self) -> Response {
        match &self {
            EnhanceError::InvalidField(_) | EnhanceError::InvalidRequest(_) => {
                tracing::warn!("Rejected enhancement request: {}", self)
            }
            _ => tracing::error!("Enhancement failed: {}", self),
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
