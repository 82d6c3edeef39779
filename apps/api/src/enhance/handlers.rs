//! Axum route handlers for the enhancement API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::enhance::error::EnhanceError;
use crate::enhance::models::{DraftRequest, DraftResponse, EnhanceRequest, EnhanceResponse};
use crate::enhance::service::{enhance, generate_draft};
use crate::state::AppState;

/// POST /api/v1/enhance
///
/// Rewrites a single summary, experience, or skills field.
pub async fn handle_enhance(
    State(state): State<AppState>,
    payload: Result<Json<EnhanceRequest>, JsonRejection>,
) -> Result<Json<EnhanceResponse>, EnhanceError> {
    let Json(request) = payload.map_err(|e| EnhanceError::InvalidRequest(e.body_text()))?;
    let response = enhance(&state.llm, &request).await?;
    Ok(Json(response))
}

/// POST /api/v1/generate
///
/// Builds a first draft (summary, job description, skills) from basic profile facts.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<Json<DraftResponse>, EnhanceError> {
    let Json(request) = payload.map_err(|e| EnhanceError::InvalidRequest(e.body_text()))?;
    let draft = generate_draft(&state.llm, &request).await?;
    Ok(Json(draft))
}
