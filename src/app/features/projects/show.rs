use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::app::{
    access, db, error::AppError, session::ApiAuthenticatedSession, AppState,
};

use super::{
    progress,
    types::{MilestoneDetail, ProjectDetailResponse},
};

/// GET /api/projects/:project_id — Project with milestones, tasks and progress.
pub async fn show(
    ApiAuthenticatedSession(user): ApiAuthenticatedSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetailResponse>, AppError> {
    // Never trust the id alone: clients may only open their own projects
    let project = access::require_project_access(&state.db, &user, &id).await?;

    let milestones = db::milestones::find_by_project_with_tasks(&state.db, &project.id).await?;
    let milestones = access::visible_milestones(&user, milestones);
    let summary = progress::compute_project_summary(&milestones);

    Ok(Json(ProjectDetailResponse {
        project,
        summary,
        milestones: milestones.into_iter().map(MilestoneDetail::from).collect(),
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/projects/:project_id", get(show))
}
