//! Project repository
//!
//! `project_tags` is stored as one JSON-encoded string column; encoding
//! happens here, decoding in the API layer when shaping responses.

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::project::{encode_tags, CreateProject, UpdateProject};
use serde::Serialize;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// Project database entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Id,
    pub project_name: String,
    pub project_description: Option<String>,
    pub project_link: Option<String>,
    pub project_github: Option<String>,
    pub project_tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, project_name, project_description, project_link, project_github, \
                       project_tags, created_at, updated_at";

pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ProjectRow>> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM project WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<ProjectRow>> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM project ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, payload: &CreateProject) -> RepositoryResult<ProjectRow> {
        let tags = payload.project_tags.as_deref().map(encode_tags);

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            INSERT INTO project
                (project_name, project_description, project_link, project_github, project_tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&payload.project_name)
        .bind(&payload.project_description)
        .bind(&payload.project_link)
        .bind(&payload.project_github)
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Id, payload: &UpdateProject) -> RepositoryResult<ProjectRow> {
        let tags = payload.project_tags.as_deref().map(encode_tags);

        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r#"
            UPDATE project SET
                project_name = COALESCE($2, project_name),
                project_description = COALESCE($3, project_description),
                project_link = COALESCE($4, project_link),
                project_github = COALESCE($5, project_github),
                project_tags = COALESCE($6, project_tags),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.project_name)
        .bind(&payload.project_description)
        .bind(&payload.project_link)
        .bind(&payload.project_github)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::NotFound(format!("project {id}")))
    }

    pub async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM project WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("project {id}")));
        }
        Ok(())
    }
}
