//! Project task API handlers
//!
//! The list endpoint returns the nested tree; create/update/delete work on
//! single tasks. Deleting a task that still has children is rejected.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use lab_core::traits::Id;
use lab_db::TaskRepository;
use lab_models::{CreateTask, UpdateTask};
use lab_tasks::build_task_tree;

use crate::error::ApiResult;
use crate::extractors::AppState;
use crate::handlers::projects::require_project;
use crate::response::ok;

/// GET /projects/:id/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    require_project(&state, project_id).await?;

    let tasks = TaskRepository::new(state.pool.clone())
        .find_for_project(project_id)
        .await?;
    Ok(ok("get task success", build_task_tree(tasks)))
}

/// POST /projects/:id/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Path(project_id): Path<Id>,
    Json(payload): Json<CreateTask>,
) -> ApiResult<impl IntoResponse> {
    payload.validate()?;
    require_project(&state, project_id).await?;

    let task = TaskRepository::new(state.pool.clone())
        .create(project_id, &payload)
        .await?;
    Ok(ok("add task success", task))
}

/// PATCH /projects/:id/tasks/:task_id
pub async fn update_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Id, Id)>,
    Json(payload): Json<UpdateTask>,
) -> ApiResult<impl IntoResponse> {
    require_project(&state, project_id).await?;

    let task = TaskRepository::new(state.pool.clone())
        .update(project_id, task_id, &payload)
        .await?;
    Ok(ok("update task success", task))
}

/// DELETE /projects/:id/tasks/:task_id
pub async fn delete_task(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Id, Id)>,
) -> ApiResult<impl IntoResponse> {
    require_project(&state, project_id).await?;

    let task = TaskRepository::new(state.pool.clone())
        .delete(project_id, task_id)
        .await?;
    Ok(ok("delete task success", task))
}
