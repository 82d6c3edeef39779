use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::saved_cv::{NewSavedCv, SavedCv, SavedCvPatch};

/// Saved-CV persistence. Every operation is scoped to `owner`; another
/// owner's record behaves exactly like a missing one.
///
/// Carried in `AppState` as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, owner: Uuid, new: NewSavedCv) -> Result<SavedCv, AppError>;

    async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<SavedCv>, AppError>;

    /// Most recently updated first.
    async fn list(&self, owner: Uuid) -> Result<Vec<SavedCv>, AppError>;

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: SavedCvPatch,
    ) -> Result<Option<SavedCv>, AppError>;

    /// Returns whether a record was deleted.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError>;
}

/// PostgreSQL-backed store over the `saved_cvs` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connects, then applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, owner: Uuid, new: NewSavedCv) -> Result<SavedCv, AppError> {
        let row = sqlx::query_as::<_, SavedCv>(
            r#"
            INSERT INTO saved_cvs (user_id, name, cv_data, template_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(new.name)
        .bind(Json(new.cv_data))
        .bind(new.template_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<SavedCv>, AppError> {
        let row = sqlx::query_as::<_, SavedCv>(
            "SELECT * FROM saved_cvs WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<SavedCv>, AppError> {
        let rows = sqlx::query_as::<_, SavedCv>(
            "SELECT * FROM saved_cvs WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: SavedCvPatch,
    ) -> Result<Option<SavedCv>, AppError> {
        let row = sqlx::query_as::<_, SavedCv>(
            r#"
            UPDATE saved_cvs
            SET name        = COALESCE($3, name),
                cv_data     = COALESCE($4, cv_data),
                template_id = COALESCE($5, template_id),
                updated_at  = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(patch.name)
        .bind(patch.cv_data.map(Json))
        .bind(patch.template_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM saved_cvs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub use memory::MemoryDocumentStore;
