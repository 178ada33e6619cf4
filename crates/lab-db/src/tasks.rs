//! Project task repository
//!
//! Tasks reference their parent by id (`0` = root). A task with children
//! cannot be deleted; the delete is rejected with a conflict, never
//! cascaded.

use chrono::{DateTime, Utc};
use lab_core::traits::Id;
use lab_models::{CreateTask, UpdateTask};
use lab_tasks::TaskRecord;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// Task row as stored; converts into the tree builder's [`TaskRecord`]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRow {
    pub id: Id,
    pub project_id: Id,
    pub parent_id: Id,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRow> for TaskRecord {
    fn from(row: TaskRow) -> Self {
        TaskRecord {
            id: row.id,
            project_id: row.project_id,
            parent_id: row.parent_id,
            title: row.title,
            subtitle: row.subtitle,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str =
    "id, project_id, parent_id, title, subtitle, content, created_at, updated_at";

/// A task may only be deleted once it has no children left.
fn ensure_deletable(child_count: i64) -> RepositoryResult<()> {
    if child_count > 0 {
        return Err(RepositoryError::Conflict(
            "task has children and cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, project_id: Id, task_id: Id) -> RepositoryResult<Option<TaskRecord>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {COLUMNS} FROM project_task WHERE project_id = $1 AND id = $2"
        ))
        .bind(project_id)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TaskRecord::from))
    }

    /// All tasks of one project in insertion (id) order, which is the
    /// order the tree builder preserves for siblings.
    pub async fn find_for_project(&self, project_id: Id) -> RepositoryResult<Vec<TaskRecord>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {COLUMNS} FROM project_task WHERE project_id = $1 ORDER BY id"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskRecord::from).collect())
    }

    pub async fn create(&self, project_id: Id, payload: &CreateTask) -> RepositoryResult<TaskRecord> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO project_task (project_id, parent_id, title, subtitle, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(project_id)
        .bind(payload.parent_or_root())
        .bind(&payload.title)
        .bind(&payload.subtitle)
        .bind(&payload.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn update(
        &self,
        project_id: Id,
        task_id: Id,
        payload: &UpdateTask,
    ) -> RepositoryResult<TaskRecord> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            UPDATE project_task SET
                parent_id = COALESCE($3, parent_id),
                title = COALESCE($4, title),
                subtitle = COALESCE($5, subtitle),
                content = COALESCE($6, content),
                updated_at = NOW()
            WHERE project_id = $1 AND id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(project_id)
        .bind(task_id)
        .bind(payload.parent_id)
        .bind(&payload.title)
        .bind(&payload.subtitle)
        .bind(&payload.content)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRecord::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("task {task_id}")))
    }

    pub async fn count_children(&self, task_id: Id) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM project_task WHERE parent_id = $1",
        )
        .bind(task_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Delete one task, rejecting the delete when children exist.
    pub async fn delete(&self, project_id: Id, task_id: Id) -> RepositoryResult<TaskRecord> {
        let task = self
            .find_by_id(project_id, task_id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("task {task_id}")))?;

        ensure_deletable(self.count_children(task_id).await?)?;

        sqlx::query("DELETE FROM project_task WHERE project_id = $1 AND id = $2")
            .bind(project_id)
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_rejected_when_children_exist() {
        let err = ensure_deletable(2).unwrap_err();
        match err {
            RepositoryError::Conflict(msg) => {
                assert_eq!(msg, "task has children and cannot be deleted");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_allowed_when_childless() {
        assert!(ensure_deletable(0).is_ok());
    }
}
