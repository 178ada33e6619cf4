//! News repository

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::{CreateNews, UpdateNews};
use serde::Serialize;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// News database entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsRow {
    pub id: Id,
    pub news_title: String,
    pub news_sub_title: String,
    pub news_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewsRepository {
    pool: PgPool,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<NewsRow>> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, news_title, news_sub_title, news_content, created_at, updated_at
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<NewsRow>> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r#"
            SELECT id, news_title, news_sub_title, news_content, created_at, updated_at
            FROM news
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, payload: &CreateNews) -> RepositoryResult<NewsRow> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            INSERT INTO news (news_title, news_sub_title, news_content)
            VALUES ($1, $2, $3)
            RETURNING id, news_title, news_sub_title, news_content, created_at, updated_at
            "#,
        )
        .bind(&payload.news_title)
        .bind(&payload.news_sub_title)
        .bind(&payload.news_content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Id, payload: &UpdateNews) -> RepositoryResult<NewsRow> {
        let row = sqlx::query_as::<_, NewsRow>(
            r#"
            UPDATE news SET
                news_title = COALESCE($2, news_title),
                news_sub_title = COALESCE($3, news_sub_title),
                news_content = COALESCE($4, news_content),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, news_title, news_sub_title, news_content, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.news_title)
        .bind(&payload.news_sub_title)
        .bind(&payload.news_content)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::NotFound(format!("news {id}")))
    }

    pub async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("news {id}")));
        }
        Ok(())
    }
}
