//! Member repository

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::{CreateMember, UpdateMember};
use serde::Serialize;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// Member database entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MemberRow {
    pub id: Id,
    pub member_name: String,
    pub member_intro: String,
    pub member_character: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<MemberRow>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, member_name, member_intro, member_character, created_at, updated_at
            FROM member
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<MemberRow>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, member_name, member_intro, member_character, created_at, updated_at
            FROM member
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new member. The payload is validated upstream.
    pub async fn create(&self, payload: &CreateMember) -> RepositoryResult<MemberRow> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO member (member_name, member_intro, member_character)
            VALUES ($1, $2, $3)
            RETURNING id, member_name, member_intro, member_character, created_at, updated_at
            "#,
        )
        .bind(&payload.member_name)
        .bind(&payload.member_intro)
        .bind(&payload.member_character)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial update: only fields present in the payload are applied.
    pub async fn update(&self, id: Id, payload: &UpdateMember) -> RepositoryResult<MemberRow> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            UPDATE member SET
                member_name = COALESCE($2, member_name),
                member_intro = COALESCE($3, member_intro),
                member_character = COALESCE($4, member_character),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, member_name, member_intro, member_character, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.member_name)
        .bind(&payload.member_intro)
        .bind(&payload.member_character)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::NotFound(format!("member {id}")))
    }

    pub async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("member {id}")));
        }
        Ok(())
    }
}
