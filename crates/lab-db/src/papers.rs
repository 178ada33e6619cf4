//! Paper repository

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::{CreatePaper, UpdatePaper};
use serde::Serialize;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// Paper database entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaperRow {
    pub id: Id,
    pub paper_title: String,
    pub paper_publish_year: Option<i32>,
    pub paper_origin: Option<String>,
    pub paper_link: Option<String>,
    pub paper_tags: Option<String>,
    pub paper_authors: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, paper_title, paper_publish_year, paper_origin, paper_link, \
                       paper_tags, paper_authors, created_at, updated_at";

pub struct PaperRepository {
    pool: PgPool,
}

impl PaperRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<PaperRow>> {
        let row = sqlx::query_as::<_, PaperRow>(&format!(
            "SELECT {COLUMNS} FROM paper WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<PaperRow>> {
        let rows = sqlx::query_as::<_, PaperRow>(&format!(
            "SELECT {COLUMNS} FROM paper ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, payload: &CreatePaper) -> RepositoryResult<PaperRow> {
        let row = sqlx::query_as::<_, PaperRow>(&format!(
            r#"
            INSERT INTO paper
                (paper_title, paper_publish_year, paper_origin, paper_link, paper_tags, paper_authors)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&payload.paper_title)
        .bind(payload.paper_publish_year)
        .bind(&payload.paper_origin)
        .bind(&payload.paper_link)
        .bind(&payload.paper_tags)
        .bind(&payload.paper_authors)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Id, payload: &UpdatePaper) -> RepositoryResult<PaperRow> {
        let row = sqlx::query_as::<_, PaperRow>(&format!(
            r#"
            UPDATE paper SET
                paper_title = COALESCE($2, paper_title),
                paper_publish_year = COALESCE($3, paper_publish_year),
                paper_origin = COALESCE($4, paper_origin),
                paper_link = COALESCE($5, paper_link),
                paper_tags = COALESCE($6, paper_tags),
                paper_authors = COALESCE($7, paper_authors),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.paper_title)
        .bind(payload.paper_publish_year)
        .bind(&payload.paper_origin)
        .bind(&payload.paper_link)
        .bind(&payload.paper_tags)
        .bind(&payload.paper_authors)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::NotFound(format!("paper {id}")))
    }

    pub async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM paper WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("paper {id}")));
        }
        Ok(())
    }
}
