use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::cv::CvData;

/// A row of the `saved_cvs` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SavedCv {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cv_data: Json<CvData>,
    pub template_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/cvs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavedCv {
    pub name: String,
    #[serde(default)]
    pub cv_data: CvData,
    pub template_id: String,
}

/// Body of `PATCH /api/v1/cvs/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCvPatch {
    pub name: Option<String>,
    pub cv_data: Option<CvData>,
    pub template_id: Option<String>,
}
