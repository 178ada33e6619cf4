//! Postgres attachment store
//!
//! Persists attachment records for the attachment service. The `kind`
//! column holds the kind's string form; rows with a kind this build no
//! longer knows are surfaced as store errors rather than skipped.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lab_attachments::{Attachment, AttachmentError, AttachmentResult, AttachmentStore};
use lab_core::traits::Id;
use lab_models::AttachmentKind;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
struct AttachmentRow {
    id: Id,
    kind: String,
    owner_id: Option<Id>,
    file_token: String,
    filename: String,
    disk_filename: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AttachmentRow {
    fn into_attachment(self) -> AttachmentResult<Attachment> {
        let kind = AttachmentKind::from_str(&self.kind)
            .ok_or_else(|| AttachmentError::Store(format!("unknown attachment kind: {}", self.kind)))?;
        Ok(Attachment {
            id: Some(self.id),
            kind,
            owner_id: self.owner_id,
            file_token: self.file_token,
            filename: self.filename,
            disk_filename: self.disk_filename,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const COLUMNS: &str =
    "id, kind, owner_id, file_token, filename, disk_filename, created_at, updated_at";

fn store_err(err: sqlx::Error) -> AttachmentError {
    AttachmentError::Store(err.to_string())
}

/// Attachment store backed by the `attachment` table
pub struct PgAttachmentStore {
    pool: PgPool,
}

impl PgAttachmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentStore for PgAttachmentStore {
    async fn insert(&self, attachment: &mut Attachment) -> AttachmentResult<Id> {
        let id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO attachment (kind, owner_id, file_token, filename, disk_filename)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(attachment.kind.as_str())
        .bind(attachment.owner_id)
        .bind(&attachment.file_token)
        .bind(&attachment.filename)
        .bind(&attachment.disk_filename)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        attachment.id = Some(id);
        Ok(id)
    }

    async fn find_by_token(
        &self,
        kind: AttachmentKind,
        token: &str,
    ) -> AttachmentResult<Option<Attachment>> {
        let row = sqlx::query_as::<_, AttachmentRow>(&format!(
            "SELECT {COLUMNS} FROM attachment WHERE kind = $1 AND file_token = $2"
        ))
        .bind(kind.as_str())
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.map(AttachmentRow::into_attachment).transpose()
    }

    async fn list_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<Vec<Attachment>> {
        let rows = sqlx::query_as::<_, AttachmentRow>(&format!(
            "SELECT {COLUMNS} FROM attachment WHERE kind = $1 AND owner_id = $2 ORDER BY id"
        ))
        .bind(kind.as_str())
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.into_iter().map(AttachmentRow::into_attachment).collect()
    }

    async fn list_all(&self, kind: AttachmentKind) -> AttachmentResult<Vec<Attachment>> {
        let rows = sqlx::query_as::<_, AttachmentRow>(&format!(
            "SELECT {COLUMNS} FROM attachment WHERE kind = $1 ORDER BY id"
        ))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.into_iter().map(AttachmentRow::into_attachment).collect()
    }

    async fn count_for_owner(
        &self,
        kind: AttachmentKind,
        owner_id: Id,
    ) -> AttachmentResult<usize> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attachment WHERE kind = $1 AND owner_id = $2",
        )
        .bind(kind.as_str())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(count as usize)
    }

    async fn delete(&self, id: Id) -> AttachmentResult<()> {
        sqlx::query("DELETE FROM attachment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}
