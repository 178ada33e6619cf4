//! Unowned asset handlers
//!
//! News images and project task images belong to no single row; they are
//! globally listed pools referenced from article/task content by token.

use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use lab_models::AttachmentKind;

use crate::error::ApiResult;
use crate::extractors::{read_upload, AppState};
use crate::handlers::{file_response, AttachmentResponse};
use crate::response::ok;

async fn list(state: &AppState, kind: AttachmentKind) -> ApiResult<Vec<AttachmentResponse>> {
    Ok(state
        .attachments
        .list_all(kind)
        .await?
        .into_iter()
        .map(AttachmentResponse::from)
        .collect())
}

async fn upload(
    state: &AppState,
    kind: AttachmentKind,
    multipart: Multipart,
) -> ApiResult<AttachmentResponse> {
    let file = read_upload(multipart).await?;
    let attachment = state
        .attachments
        .add(kind, None, &file.filename, file.data)
        .await?;
    Ok(AttachmentResponse::from(attachment))
}

/// GET /news/images
pub async fn list_news_images(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let images = list(&state, AttachmentKind::NewsImage).await?;
    Ok(ok("get news image success", images))
}

/// POST /news/images
pub async fn upload_news_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let image = upload(&state, AttachmentKind::NewsImage, multipart).await?;
    Ok(ok("add news image success", image))
}

/// GET /news/images/:token
pub async fn download_news_image(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let (attachment, data) = state
        .attachments
        .download(AttachmentKind::NewsImage, None, &token)
        .await?;
    Ok(file_response(&attachment, data))
}

/// DELETE /news/images/:token
pub async fn delete_news_image(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let attachment = state
        .attachments
        .remove(AttachmentKind::NewsImage, None, &token)
        .await?;
    Ok(ok(
        "delete news image success",
        AttachmentResponse::from(attachment),
    ))
}

/// GET /projects/task-images
pub async fn list_task_images(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let images = list(&state, AttachmentKind::ProjectTaskImage).await?;
    Ok(ok("get task image success", images))
}

/// POST /projects/task-images
pub async fn upload_task_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let image = upload(&state, AttachmentKind::ProjectTaskImage, multipart).await?;
    Ok(ok("add task image success", image))
}

/// GET /projects/task-images/:token
pub async fn download_task_image(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let (attachment, data) = state
        .attachments
        .download(AttachmentKind::ProjectTaskImage, None, &token)
        .await?;
    Ok(file_response(&attachment, data))
}

/// DELETE /projects/task-images/:token
pub async fn delete_task_image(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let attachment = state
        .attachments
        .remove(AttachmentKind::ProjectTaskImage, None, &token)
        .await?;
    Ok(ok(
        "delete task image success",
        AttachmentResponse::from(attachment),
    ))
}
