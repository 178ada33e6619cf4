//! API routes

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{activities, assets, members, news, papers, projects, tasks};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/members", members_router())
        .nest("/papers", papers_router())
        .nest("/activities", activities_router())
        .nest("/projects", projects_router())
        .nest("/news", news_router())
}

fn members_router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list_members))
        .route("/", post(members::create_member))
        .route("/:id", patch(members::update_member))
        .route("/:id", delete(members::delete_member))
        .route("/:id/member-image", post(members::upload_image))
        .route("/:id/member-image/:token", get(members::download_image))
        .route("/:id/member-image/:token", delete(members::delete_image))
}

fn papers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(papers::list_papers))
        .route("/", post(papers::create_paper))
        .route("/:id", patch(papers::update_paper))
        .route("/:id", delete(papers::delete_paper))
        .route("/:id/paper-attachment", post(papers::upload_attachment))
        .route("/:id/paper-attachment/:token", get(papers::download_attachment))
        .route("/:id/paper-attachment/:token", delete(papers::delete_attachment))
}

fn activities_router() -> Router<AppState> {
    Router::new()
        .route("/", get(activities::list_activities))
        .route("/", post(activities::create_activity))
        .route("/:id", patch(activities::update_activity))
        .route("/:id", delete(activities::delete_activity))
        .route("/:id/activity-image", post(activities::upload_image))
        .route("/:id/activity-image/:token", get(activities::download_image))
        .route("/:id/activity-image/:token", delete(activities::delete_image))
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects))
        .route("/", post(projects::create_project))
        .route("/:id", patch(projects::update_project))
        .route("/:id", delete(projects::delete_project))
        .route("/:id/project-icon", post(projects::upload_icon))
        .route("/:id/project-icon/:token", get(projects::download_icon))
        .route("/:id/project-icon/:token", delete(projects::delete_icon))
        // Global task image pool; the static segment wins over `/:id`
        .route("/task-images", get(assets::list_task_images))
        .route("/task-images", post(assets::upload_task_image))
        .route("/task-images/:token", get(assets::download_task_image))
        .route("/task-images/:token", delete(assets::delete_task_image))
        .route("/:id/tasks", get(tasks::list_tasks))
        .route("/:id/tasks", post(tasks::create_task))
        .route("/:id/tasks/:task_id", patch(tasks::update_task))
        .route("/:id/tasks/:task_id", delete(tasks::delete_task))
}

fn news_router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list_news))
        .route("/", post(news::create_news))
        .route("/:id", patch(news::update_news))
        .route("/:id", delete(news::delete_news))
        .route("/images", get(assets::list_news_images))
        .route("/images", post(assets::upload_news_image))
        .route("/images/:token", get(assets::download_news_image))
        .route("/images/:token", delete(assets::delete_news_image))
}
