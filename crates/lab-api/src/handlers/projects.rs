//! Project API handlers
//!
//! The stored tags column is a JSON-encoded string; responses decode it
//! back into an array. Task endpoints live in [`crate::handlers::tasks`].

use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_db::{ProjectRepository, ProjectRow};
use lab_models::project::decode_tags;
use lab_models::{AttachmentKind, CreateProject, UpdateProject};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{read_upload, AppState};
use crate::handlers::{file_response, AttachmentResponse};
use crate::response::ok;

const KIND: AttachmentKind = AttachmentKind::ProjectIcon;

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Id,
    pub project_name: String,
    pub project_description: Option<String>,
    pub project_link: Option<String>,
    pub project_github: Option<String>,
    pub project_tags: Option<Vec<String>>,
    pub project_icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

async fn with_icon(state: &AppState, row: ProjectRow) -> ApiResult<ProjectResponse> {
    let tokens = state.attachments.tokens_for_owner(KIND, row.id).await?;
    Ok(ProjectResponse {
        id: row.id,
        project_name: row.project_name,
        project_description: row.project_description,
        project_link: row.project_link,
        project_github: row.project_github,
        project_tags: decode_tags(row.project_tags.as_deref()),
        project_icon: tokens.into_iter().next(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub(crate) async fn require_project(state: &AppState, id: Id) -> ApiResult<ProjectRow> {
    ProjectRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("project"))
}

/// GET /projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = ProjectRepository::new(state.pool.clone()).find_all().await?;

    let mut projects = Vec::with_capacity(rows.len());
    for row in rows {
        projects.push(with_icon(&state, row).await?);
    }
    Ok(ok("get project success", projects))
}

/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProject>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    let row = ProjectRepository::new(state.pool.clone())
        .create(&payload)
        .await?;
    Ok(ok("add project success", with_icon(&state, row).await?))
}

/// PATCH /projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(payload): Json<UpdateProject>,
) -> ApiResult<impl IntoResponse> {
    let row = ProjectRepository::new(state.pool.clone())
        .update(id, &payload)
        .await?;
    Ok(ok("update project success", with_icon(&state, row).await?))
}

/// DELETE /projects/:id
///
/// Cascades the icon; tasks go with the row via the foreign key.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let row = require_project(&state, id).await?;
    let response = with_icon(&state, row).await?;

    state.attachments.remove_all_for_owner(KIND, id).await?;
    ProjectRepository::new(state.pool.clone()).delete(id).await?;

    Ok(ok("delete project success", response))
}

/// POST /projects/:id/project-icon
pub async fn upload_icon(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    require_project(&state, id).await?;
    let upload = read_upload(multipart).await?;

    let attachment = state
        .attachments
        .add(KIND, Some(id), &upload.filename, upload.data)
        .await?;
    Ok(ok(
        "add project icon success",
        AttachmentResponse::from(attachment),
    ))
}

/// GET /projects/:id/project-icon/:token
pub async fn download_icon(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_project(&state, id).await?;
    let (attachment, data) = state.attachments.download(KIND, Some(id), &token).await?;
    Ok(file_response(&attachment, data))
}

/// DELETE /projects/:id/project-icon/:token
pub async fn delete_icon(
    State(state): State<AppState>,
    Path((id, token)): Path<(Id, String)>,
) -> ApiResult<impl IntoResponse> {
    require_project(&state, id).await?;
    let attachment = state.attachments.remove(KIND, Some(id), &token).await?;
    Ok(ok(
        "delete project icon success",
        AttachmentResponse::from(attachment),
    ))
}
