//! Member API handlers

use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use lab_core::traits::Id;
use lab_db::{MemberRepository, MemberRow};
use lab_models::{AttachmentKind, CreateMember, UpdateMember};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{read_upload, AppState};
use crate::handlers::{file_response, AttachmentResponse};
use crate::response::ok;

const KIND: AttachmentKind = AttachmentKind::MemberImage;

/// Member row plus its image token, `null` when no image is uploaded
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    #[serde(flatten)]
    member: MemberRow,
    member_image: Option<String>,
}

async fn with_image(state: &AppState, member: MemberRow) -> ApiResult<MemberResponse> {
    let tokens = state.attachments.tokens_for_owner(KIND, member.id).await?;
    Ok(MemberResponse {
        member,
        member_image: tokens.into_iter().next(),
    })
}

async fn require_member(state: &AppState, id: Id) -> ApiResult<MemberRow> {
    MemberRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("member"))
}

/// GET /members
pub async fn list_members(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = MemberRepository::new(state.pool.clone()).find_all().await?;

    let mut members = Vec::with_capacity(rows.len());
    for row in rows {
        members.push(with_image(&state, row).await?);
    }
    Ok(ok("get member success", members))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateMember>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let row = MemberRepository::new(state.pool.clone())
        .create(&payload)
        .await?;
    Ok(ok("add member success", with_image(&state, row).await?))
}

/// PATCH /members/:id
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(payload): Json<UpdateMember>,
) -> ApiResult<impl IntoResponse> {
    let row = MemberRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?;
    Ok(ok("update member success", with_image(&state, row).await?))
}

/// DELETE /members/:id
///
/// Removes the image file and row before the member row. A failed file
/// removal aborts the request with everything still in place.
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let row = require_member(&state, id).await?;
    let response = with_image(&state, row).await?;

    state.attachments.remove_all_for_owner(KIND, id).await?;
    MemberRepository::new(state.pool.clone()).delete(id).await?;

    Ok(ok("delete member success", response))
}

/// POST /members/:id/member-image
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    require_member(&state, id).await?;
    let upload = read_upload(multipart).await?;

    let attachment = state
        .attachments
        .add(KIND, Some(id), &upload.filename, upload.data)
        .await?;
    Ok(ok(
        "add member image success",
        AttachmentResponse::from(attachment),
    ))
}

/// GET /members/:id/member-image/:token
pub async fn download_image(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_member(&state, id).await?;
    let (attachment, data) = state.attachments.download(KIND, Some(id), &token).await?;
    Ok(file_response(&attachment, data))
}

/// DELETE /members/:id/member-image/:token
pub async fn delete_image(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_member(&state, id).await?;
    let attachment = state.attachments.remove(KIND, Some(id), &token).await?;
    Ok(ok(
        "delete member image success",
        AttachmentResponse::from(attachment),
    ))
}
