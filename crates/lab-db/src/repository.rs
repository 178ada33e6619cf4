//! Repository error types shared by all repositories

use thiserror::Error;

/// Error type for repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
