//! Paper API handlers

use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use lab_core::traits::Id;
use lab_db::{PaperRepository, PaperRow};
use lab_models::{AttachmentKind, CreatePaper, UpdatePaper};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{read_upload, AppState};
use crate::handlers::{file_response, AttachmentResponse};
use crate::response::ok;

const KIND: AttachmentKind = AttachmentKind::PaperAttachment;

/// Paper row plus its attachment token, `null` when none is uploaded
#[derive(Debug, Serialize)]
pub struct PaperResponse {
    #[serde(flatten)]
    paper: PaperRow,
    paper_attachment: Option<String>,
}

async fn with_attachment(state: &AppState, paper: PaperRow) -> ApiResult<PaperResponse> {
    let tokens = state.attachments.tokens_for_owner(KIND, paper.id).await?;
    Ok(PaperResponse {
        paper,
        paper_attachment: tokens.into_iter().next(),
    })
}

async fn require_paper(state: &AppState, id: Id) -> ApiResult<PaperRow> {
    PaperRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("paper"))
}

/// GET /papers
pub async fn list_papers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = PaperRepository::new(state.pool.clone()).find_all().await?;

    let mut papers = Vec::with_capacity(rows.len());
    for row in rows {
        papers.push(with_attachment(&state, row).await?);
    }
    Ok(ok("get paper success", papers))
}

/// POST /papers
pub async fn create_paper(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaper>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let row = PaperRepository::new(state.pool.clone())
        .create(&payload)
        .await?;
    Ok(ok("add paper success", with_attachment(&state, row).await?))
}

/// PATCH /papers/:id
pub async fn update_paper(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(payload): Json<UpdatePaper>,
) -> ApiResult<impl IntoResponse> {
    let row = PaperRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?;
    Ok(ok("update paper success", with_attachment(&state, row).await?))
}

/// DELETE /papers/:id
pub async fn delete_paper(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let row = require_paper(&state, id).await?;
    let response = with_attachment(&state, row).await?;

    state.attachments.remove_all_for_owner(KIND, id).await?;
    PaperRepository::new(state.pool.clone()).delete(id).await?;

    Ok(ok("delete paper success", response))
}

/// POST /papers/:id/paper-attachment
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    require_paper(&state, id).await?;
    let upload = read_upload(multipart).await?;

    let attachment = state
        .attachments
        .add(KIND, Some(id), &upload.filename, upload.data)
        .await?;
    Ok(ok(
        "add paper attachment success",
        AttachmentResponse::from(attachment),
    ))
}

/// GET /papers/:id/paper-attachment/:token
pub async fn download_attachment(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_paper(&state, id).await?;
    let (attachment, data) = state.attachments.download(KIND, Some(id), &token).await?;
    Ok(file_response(&attachment, data))
}

/// DELETE /papers/:id/paper-attachment/:token
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_paper(&state, id).await?;
    let attachment = state.attachments.remove(KIND, Some(id), &token).await?;
    Ok(ok(
        "delete paper attachment success",
        AttachmentResponse::from(attachment),
    ))
}
