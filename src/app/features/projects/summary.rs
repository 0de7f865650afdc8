use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::app::{
    access, db, error::AppError, session::ApiAuthenticatedSession, AppState,
};

use super::{
    progress::{self, MilestoneProgress, ProjectSummary},
    types::MilestonePathParams,
};

/// GET /api/projects/:project_id/summary — Progress and payment totals for a project.
pub async fn project_summary(
    ApiAuthenticatedSession(user): ApiAuthenticatedSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectSummary>, AppError> {
    let project = access::require_project_access(&state.db, &user, &id).await?;

    let milestones = db::milestones::find_by_project_with_tasks(&state.db, &project.id).await?;
    let milestones = access::visible_milestones(&user, milestones);

    Ok(Json(progress::compute_project_summary(&milestones)))
}

/// GET /api/projects/:project_id/milestones/:milestone_id/progress — Progress of one milestone.
pub async fn milestone_progress(
    ApiAuthenticatedSession(user): ApiAuthenticatedSession,
    State(state): State<AppState>,
    Path(params): Path<MilestonePathParams>,
) -> Result<Json<MilestoneProgress>, AppError> {
    let project = access::require_project_access(&state.db, &user, &params.project_id).await?;

    let milestones = db::milestones::find_by_project_with_tasks(&state.db, &project.id).await?;
    let milestone = access::visible_milestones(&user, milestones)
        .into_iter()
        .find(|m| m.milestone.id == params.milestone_id)
        .ok_or_else(|| AppError::NotFound("Milestone not found".to_string()))?;

    Ok(Json(progress::compute_milestone_progress(&milestone)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects/:project_id/summary", get(project_summary))
        .route(
            "/api/projects/:project_id/milestones/:milestone_id/progress",
            get(milestone_progress),
        )
}
