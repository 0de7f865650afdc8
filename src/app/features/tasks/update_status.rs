use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::patch,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::app::{
    access, db,
    domain::{InvalidTransition, TaskStatus},
    error::AppError,
    session::ApiAuthenticatedSession,
    AppState,
};

/// Path parameters for task endpoints.
#[derive(Debug, Deserialize)]
pub struct TaskPathParams {
    pub project_id: String,
    pub task_id: String,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Response after a successful status change.
#[derive(Debug, Serialize)]
pub struct TaskStatusResponse {
    pub id: String,
    pub milestone_id: String,
    pub previous_status: TaskStatus,
    pub status: TaskStatus,
}

/// PATCH /api/projects/:project_id/tasks/:task_id/status — Move a task along its workflow.
///
/// Role and workflow checks run before any write. The write itself only applies if the
/// stored status is unchanged since it was read.
pub async fn update_status(
    ApiAuthenticatedSession(user): ApiAuthenticatedSession,
    State(state): State<AppState>,
    Path(params): Path<TaskPathParams>,
    request: Result<Json<UpdateTaskStatusRequest>, JsonRejection>,
) -> Result<Json<TaskStatusResponse>, AppError> {
    let Json(request) = request.map_err(|e| AppError::Validation(e.body_text()))?;

    let project = access::require_project_access(&state.db, &user, &params.project_id).await?;

    let found = db::tasks::find_with_project(&state.db, &params.task_id)
        .await?
        .filter(|t| t.project_id == project.id)
        .filter(|t| user.role.is_agency() || (t.task.is_visible && t.milestone_is_visible))
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let from = found.task.status;
    let to = request.status;

    if !access::may_change_task_status(user.role, from, to) {
        tracing::debug!(user_id = %user.user_id, task_id = %found.task.id, %from, %to, "status change not permitted for role");
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    let to = from.transition_to(to).map_err(|err: InvalidTransition| {
        tracing::debug!(task_id = %found.task.id, %err, "rejected task transition");
        err
    })?;

    let mut tx = state.db.begin().await?;
    if !db::tasks::update_status(&mut *tx, &found.task.id, from, to).await? {
        return Err(AppError::Conflict(
            "Task status changed by another request; reload and retry".to_string(),
        ));
    }
    db::projects::touch(&mut *tx, &project.id).await?;
    tx.commit().await?;

    tracing::info!(task_id = %found.task.id, project_id = %project.id, %from, %to, "task status updated");

    Ok(Json(TaskStatusResponse {
        id: found.task.id,
        milestone_id: found.task.milestone_id,
        previous_status: from,
        status: to,
    }))
}

/// Task status routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/projects/:project_id/tasks/:task_id/status",
        patch(update_status),
    )
}
