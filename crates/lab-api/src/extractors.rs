//! Application state and request extraction helpers

use std::sync::Arc;

use axum::extract::Multipart;
use bytes::Bytes;
use lab_attachments::{AttachmentService, LocalStorage};
use lab_core::config::AppConfig;
use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};

/// The concrete attachment service wired into the application
pub type Attachments = AttachmentService<lab_db::PgAttachmentStore, LocalStorage>;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub attachments: Arc<Attachments>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let store = Arc::new(lab_db::PgAttachmentStore::new(pool.clone()));
        let storage = Arc::new(LocalStorage::new(&config.storage.base_path));
        Self {
            pool,
            config: Arc::new(config),
            attachments: Arc::new(AttachmentService::new(store, storage)),
        }
    }
}

/// One uploaded file pulled out of a multipart body
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Read the first file field from a multipart body.
///
/// The upload endpoints accept exactly one file; additional fields are
/// ignored. A body with no file field is a validation failure.
pub async fn read_upload(mut multipart: Multipart) -> ApiResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        return Ok(UploadedFile { filename, data });
    }
    Err(ApiError::bad_request("no file field in request"))
}
