//! Identity — resolves bearer tokens to subjects via the hosted identity
//! provider (Supabase Auth). Session management itself stays with the provider.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    Json,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated user behind a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity provider returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Answers "who is the subject behind this access token?".
/// `Ok(None)` means the token is not (or no longer) a valid session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_subject(&self, access_token: &str) -> Result<Option<Subject>, IdentityError>;
}

/// Supabase Auth over its REST API (`GET /auth/v1/user`).
#[derive(Clone)]
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn current_subject(&self, access_token: &str) -> Result<Option<Subject>, IdentityError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            debug!("Identity provider rejected token ({status})");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(response.json::<Subject>().await?))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn resolve(state: &AppState, headers: &HeaderMap) -> Result<Option<Subject>, AppError> {
    match bearer_token(headers) {
        Some(token) => Ok(state.identity.current_subject(token).await?),
        None => Ok(None),
    }
}

/// Extractor for handlers that require a signed-in user.
/// Rejects with `401` when the bearer token is absent or invalid.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Subject);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(state, &parts.headers)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// GET /api/v1/session
///
/// Reports whether the request carries a valid session. Never answers 401.
pub async fn handle_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let subject = resolve(&state, &headers).await?;
    Ok(Json(SessionResponse {
        authenticated: subject.is_some(),
        user_id: subject.as_ref().map(|s| s.id),
        email: subject.and_then(|s| s.email),
    }))
}
