//! API handlers, one module per resource kind

pub mod activities;
pub mod assets;
pub mod members;
pub mod news;
pub mod papers;
pub mod projects;
pub mod tasks;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use lab_attachments::Attachment;
use serde::Serialize;

/// Serialized attachment as returned by upload and delete endpoints.
/// The disk filename stays internal; clients see only the opaque token.
#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    pub file_token: String,
    pub filename: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Attachment> for AttachmentResponse {
    fn from(attachment: Attachment) -> Self {
        let content_type = attachment.content_type();
        Self {
            file_token: attachment.file_token,
            filename: attachment.filename,
            content_type,
            created_at: attachment.created_at,
            updated_at: attachment.updated_at,
        }
    }
}

/// Raw file download: stored bytes, inferred content type, and the
/// original filename in the content disposition.
pub(crate) fn file_response(attachment: &Attachment, data: Bytes) -> Response {
    (
        [
            (header::CONTENT_TYPE, attachment.content_type()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", attachment.filename),
            ),
        ],
        data,
    )
        .into_response()
}
