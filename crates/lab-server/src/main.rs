//! Lab Site RS server
//!
//! Binary entry point: loads configuration, connects the database pool,
//! runs migrations, prepares the storage directories, and serves the API
//! until shutdown.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lab_api::AppState;
use lab_core::config::AppConfig;
use lab_db::{Database, DatabaseConfig};

mod health;

use health::HealthChecker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting Lab Site RS"
    );

    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.pool_size,
        connect_timeout_secs: config.database.pool_timeout_seconds,
        ..Default::default()
    };
    let db = Database::connect(&db_config).await?;
    info!("Connected to database");

    lab_db::run_migrations(db.pool()).await?;
    info!("Migrations applied");

    let storage_dirs = vec![config.storage.images_dir(), config.storage.attachments_dir()];
    for dir in &storage_dirs {
        tokio::fs::create_dir_all(dir).await?;
    }
    info!(base = %config.storage.base_path.display(), "Storage directories ready");

    let health_checker = Arc::new(
        HealthChecker::new()
            .with_pool(db.pool().clone())
            .with_storage_dirs(storage_dirs),
    );

    let state = AppState::new(db.pool().clone(), config.clone());
    let app = build_router(state, health_checker, config.server.max_body_size_bytes);

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,lab_server=debug,lab_api=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Assemble the application router: health probes plus the API, behind
/// trace/compression/cors layers and the upload body limit.
fn build_router(
    state: AppState,
    health_checker: Arc<HealthChecker>,
    max_body_size: usize,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health_checker);

    Router::new()
        .merge(health_routes)
        .merge(lab_api::router().with_state(state))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let app = Router::new()
            .route("/health", get(health::liveness))
            .route("/health/live", get(health::liveness));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
