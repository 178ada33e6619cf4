//! News API handlers
//!
//! News rows carry no owned attachments; news images are a global pool
//! served by [`crate::handlers::assets`].

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use lab_core::traits::Id;
use lab_db::{NewsRepository, NewsRow};
use lab_models::{CreateNews, UpdateNews};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AppState;
use crate::response::ok;

/// GET /news
pub async fn list_news(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = NewsRepository::new(state.pool.clone()).find_all().await?;
    Ok(ok("get news success", rows))
}

/// POST /news
pub async fn create_news(
    State(state): State<AppState>,
    Json(payload): Json<CreateNews>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let row = NewsRepository::new(state.pool.clone())
        .create(&payload)
        .await?;
    Ok(ok("add news success", row))
}

/// PATCH /news/:id
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(payload): Json<UpdateNews>,
) -> ApiResult<impl IntoResponse> {
    let row = NewsRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?;
    Ok(ok("update news success", row))
}

/// DELETE /news/:id
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let repo = NewsRepository::new(state.pool.clone());
    let row: NewsRow = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("news"))?;

    repo.delete(id).await?;
    Ok(ok("delete news success", row))
}
