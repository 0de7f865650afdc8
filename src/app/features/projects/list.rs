use axum::{extract::State, routing::get, Json, Router};

use crate::app::{
    access, db, error::AppError, session::ApiAuthenticatedSession, AppState,
};

use super::{progress, types::ProjectListItem};

/// GET /api/projects — Projects visible to the caller, each with its summary.
pub async fn list(
    ApiAuthenticatedSession(user): ApiAuthenticatedSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectListItem>>, AppError> {
    let projects = access::visible_projects(&state.db, &user).await?;

    let mut items = Vec::with_capacity(projects.len());
    for project in projects {
        let milestones = db::milestones::find_by_project_with_tasks(&state.db, &project.id).await?;
        let milestones = access::visible_milestones(&user, milestones);
        items.push(ProjectListItem {
            summary: progress::compute_project_summary(&milestones),
            project,
        });
    }

    Ok(Json(items))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/projects", get(list))
}
