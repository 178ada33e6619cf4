//! API error handling
//!
//! Maps domain errors into the response envelope with `"response": null`.
//! Statuses: 404 for missing entities, 400 for validation failures and
//! conflicts, 500 for infrastructure failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lab_attachments::{AttachmentError, StorageError};
use lab_core::error::ValidationErrors;
use lab_db::RepositoryError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    /// Canonical missing-entity message: `"<what> not exist"`
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{what} not exist"))
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn description(&self) -> &str {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope {
    description: String,
    response: Option<()>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!(error = %msg, "Request failed");
        }
        let body = ErrorEnvelope {
            description: self.description().to_string(),
            response: None,
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(errors.full_messages().join(", "))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ApiError::not_found(what),
            RepositoryError::Conflict(msg) => ApiError::BadRequest(msg),
            RepositoryError::Database(e) => ApiError::internal(format!("database error: {e}")),
            RepositoryError::Migration(msg) => ApiError::internal(msg),
        }
    }
}

impl From<AttachmentError> for ApiError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AttachmentError::OnlyOneAllowed(_) => ApiError::BadRequest(err.to_string()),
            AttachmentError::Storage(StorageError::NotFound(key)) => {
                ApiError::internal(format!("stored file missing: {key}"))
            }
            AttachmentError::Storage(e) => ApiError::internal(format!("storage error: {e}")),
            AttachmentError::Store(msg) => ApiError::internal(format!("store error: {msg}")),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ApiError::BadRequest(format!("invalid multipart body: {err}"))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("member");
        assert_eq!(err.description(), "member not exist");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_400() {
        let err: ApiError = AttachmentError::OnlyOneAllowed("member image").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.description(), "only one member image is allowed");
    }

    #[test]
    fn test_validation_joins_messages() {
        let errors = ValidationErrors::missing_fields(&["news_title", "news_content"]);
        let err: ApiError = errors.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.description(),
            "news_content is required, news_title is required"
        );
    }

    #[test]
    fn test_repository_not_found() {
        let err: ApiError = RepositoryError::NotFound("paper 9".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.description(), "paper 9 not exist");
    }
}
