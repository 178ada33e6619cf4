//! Database migration runner

use sqlx::PgPool;
use tracing::info;

use crate::repository::RepositoryError;

/// Run all pending database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::Migration(e.to_string()))?;

    info!("Database migrations completed");
    Ok(())
}
