//! Axum route handlers for saved CVs. Every route requires a signed-in user.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::saved_cv::{NewSavedCv, SavedCv, SavedCvPatch};
use crate::state::AppState;
use crate::templates::Template;

fn check_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    Ok(())
}

fn check_template(template_id: &str) -> Result<(), AppError> {
    if Template::find(template_id).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown template '{template_id}'"
        )));
    }
    Ok(())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("CV {id} not found"))
}

/// POST /api/v1/cvs
pub async fn handle_create_cv(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewSavedCv>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedCv>), AppError> {
    let Json(req) = payload?;
    check_name(&req.name)?;
    check_template(&req.template_id)?;

    let saved = state.documents.create(user.id, req).await?;
    info!("Saved CV {} for user {}", saved.id, user.id);
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/cvs
pub async fn handle_list_cvs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<SavedCv>>, AppError> {
    Ok(Json(state.documents.list(user.id).await?))
}

/// GET /api/v1/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SavedCv>, AppError> {
    let Path(id) = id?;
    state
        .documents
        .get(user.id, id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// PATCH /api/v1/cvs/:id
pub async fn handle_update_cv(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SavedCvPatch>, JsonRejection>,
) -> Result<Json<SavedCv>, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    if let Some(name) = &patch.name {
        check_name(name)?;
    }
    if let Some(template_id) = &patch.template_id {
        check_template(template_id)?;
    }

    state
        .documents
        .update(user.id, id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /api/v1/cvs/:id
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    if state.documents.delete(user.id, id).await? {
        info!("Deleted CV {id} for user {}", user.id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
