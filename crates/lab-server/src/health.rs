//! Health checks
//!
//! Liveness answers unconditionally; readiness pings the database and
//! verifies the storage directories exist. Reports are cached briefly so
//! probes do not hammer the pool.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

struct CachedHealth {
    report: HealthReport,
    cached_at: Instant,
}

pub struct HealthChecker {
    cache_duration: Duration,
    start_time: Instant,
    cache: RwLock<Option<CachedHealth>>,
    pool: Option<PgPool>,
    storage_dirs: Vec<PathBuf>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            cache_duration: Duration::from_secs(10),
            start_time: Instant::now(),
            cache: RwLock::new(None),
            pool: None,
            storage_dirs: Vec::new(),
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_storage_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.storage_dirs = dirs;
        self
    }

    pub async fn check(&self) -> HealthReport {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.cached_at.elapsed() < self.cache_duration {
                    debug!("Returning cached health report");
                    return cached.report.clone();
                }
            }
        }

        let report = self.perform_checks().await;

        let mut cache = self.cache.write().await;
        *cache = Some(CachedHealth {
            report: report.clone(),
            cached_at: Instant::now(),
        });
        report
    }

    async fn perform_checks(&self) -> HealthReport {
        let mut components = Vec::new();

        if let Some(pool) = &self.pool {
            components.push(check_database(pool).await);
        }
        components.push(self.check_storage().await);

        let status = if components
            .iter()
            .all(|c| c.status == HealthStatus::Healthy)
        {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_storage(&self) -> ComponentHealth {
        let start = Instant::now();
        let missing: Vec<_> = self
            .storage_dirs
            .iter()
            .filter(|dir| !dir.is_dir())
            .collect();

        let (status, message) = if missing.is_empty() {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Unhealthy,
                Some(format!("missing storage directories: {missing:?}")),
            )
        };

        ComponentHealth {
            name: "storage",
            status,
            message,
            response_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

async fn check_database(pool: &PgPool) -> ComponentHealth {
    let start = Instant::now();
    let (status, message) = match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => (HealthStatus::Healthy, None),
        Err(e) => (HealthStatus::Unhealthy, Some(e.to_string())),
    };

    ComponentHealth {
        name: "database",
        status,
        message,
        response_time_ms: start.elapsed().as_millis() as u64,
    }
}

/// Simple liveness probe
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness probe: database + storage
pub async fn readiness(
    State(checker): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    let status = report.http_status();
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_components_is_healthy() {
        let checker = HealthChecker::new();
        let report = checker.check().await;
        assert_eq!(report.status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_missing_storage_dir_is_unhealthy() {
        let checker = HealthChecker::new()
            .with_storage_dirs(vec![PathBuf::from("/nonexistent/lab-site-storage")]);
        let report = checker.check().await;
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.components.len(), 1);
        assert_eq!(report.components[0].name, "storage");
    }

    #[tokio::test]
    async fn test_reports_are_cached() {
        let checker = HealthChecker::new();
        let first = checker.check().await;
        let second = checker.check().await;
        assert_eq!(first.timestamp, second.timestamp);
    }
}
