//! Activity API handlers
//!
//! Activities hold any number of images, so the serialized row carries an
//! ordered token list instead of a single nullable token.

use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use lab_core::traits::Id;
use lab_db::{ActivityRepository, ActivityRow};
use lab_models::{AttachmentKind, CreateActivity, UpdateActivity};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{read_upload, AppState};
use crate::handlers::{file_response, AttachmentResponse};
use crate::response::ok;

const KIND: AttachmentKind = AttachmentKind::ActivityImage;

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    #[serde(flatten)]
    activity: ActivityRow,
    activity_images: Vec<String>,
}

async fn with_images(state: &AppState, activity: ActivityRow) -> ApiResult<ActivityResponse> {
    let activity_images = state.attachments.tokens_for_owner(KIND, activity.id).await?;
    Ok(ActivityResponse {
        activity,
        activity_images,
    })
}

async fn require_activity(state: &AppState, id: Id) -> ApiResult<ActivityRow> {
    ActivityRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("activity"))
}

/// GET /activities
pub async fn list_activities(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = ActivityRepository::new(state.pool.clone()).find_all().await?;

    let mut activities = Vec::with_capacity(rows.len());
    for row in rows {
        activities.push(with_images(&state, row).await?);
    }
    Ok(ok("get activity success", activities))
}

/// POST /activities
pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivity>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let row = ActivityRepository::new(state.pool.clone())
        .create(&payload)
        .await?;
    Ok(ok("add activity success", with_images(&state, row).await?))
}

/// PATCH /activities/:id
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(payload): Json<UpdateActivity>,
) -> ApiResult<impl IntoResponse> {
    let row = ActivityRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?;
    Ok(ok("update activity success", with_images(&state, row).await?))
}

/// DELETE /activities/:id
///
/// Cascades every image, files before rows.
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let row = require_activity(&state, id).await?;
    let response = with_images(&state, row).await?;

    state.attachments.remove_all_for_owner(KIND, id).await?;
    ActivityRepository::new(state.pool.clone()).delete(id).await?;

    Ok(ok("delete activity success", response))
}

/// POST /activities/:id/activity-image
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    require_activity(&state, id).await?;
    let upload = read_upload(multipart).await?;

    let attachment = state
        .attachments
        .add(KIND, Some(id), &upload.filename, upload.data)
        .await?;
    Ok(ok(
        "add activity image success",
        AttachmentResponse::from(attachment),
    ))
}

/// GET /activities/:id/activity-image/:token
pub async fn download_image(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_activity(&state, id).await?;
    let (attachment, data) = state.attachments.download(KIND, Some(id), &token).await?;
    Ok(file_response(&attachment, data))
}

/// DELETE /activities/:id/activity-image/:token
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_activity(&state, id).await?;
    let attachment = state.attachments.remove(KIND, Some(id), &token).await?;
    Ok(ok(
        "delete activity image success",
        AttachmentResponse::from(attachment),
    ))
}
