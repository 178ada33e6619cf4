//! Activity repository

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::{CreateActivity, UpdateActivity};
use serde::Serialize;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// Activity database entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: Id,
    pub activity_title: String,
    pub activity_sub_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<ActivityRow>> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, activity_title, activity_sub_title, created_at, updated_at
            FROM activity
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<ActivityRow>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, activity_title, activity_sub_title, created_at, updated_at
            FROM activity
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, payload: &CreateActivity) -> RepositoryResult<ActivityRow> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            INSERT INTO activity (activity_title, activity_sub_title)
            VALUES ($1, $2)
            RETURNING id, activity_title, activity_sub_title, created_at, updated_at
            "#,
        )
        .bind(&payload.activity_title)
        .bind(&payload.activity_sub_title)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Id, payload: &UpdateActivity) -> RepositoryResult<ActivityRow> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            UPDATE activity SET
                activity_title = COALESCE($2, activity_title),
                activity_sub_title = COALESCE($3, activity_sub_title),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, activity_title, activity_sub_title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.activity_title)
        .bind(&payload.activity_sub_title)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::NotFound(format!("activity {id}")))
    }

    pub async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM activity WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("activity {id}")));
        }
        Ok(())
    }
}
