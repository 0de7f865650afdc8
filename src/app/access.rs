//! Role gating for project data.
//!
//! **Rule**: admin and staff see every project and every record. Clients see only
//! projects they are the client of, and only milestones and tasks marked visible.
//! Anything a caller may not see is reported as not found.

use crate::app::{
    db::{self, milestones::MilestoneWithTasks, sessions::SessionUser, Project},
    domain::{TaskStatus, UserRole},
    error::AppError,
};

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}

/// Whether `user` may open `project`.
pub fn can_view_project(user: &SessionUser, project: &Project) -> bool {
    match user.role {
        UserRole::Admin | UserRole::Staff => true,
        UserRole::Client => project.client_id.as_deref() == Some(user.user_id.as_str()),
    }
}

/// Load a project the caller may see. Returns `NotFound` both for missing projects
/// and for projects of other clients.
pub async fn require_project_access(
    pool: &sqlx::SqlitePool,
    user: &SessionUser,
    project_id: &str,
) -> Result<Project, AppError> {
    let project = db::projects::find_by_id(pool, project_id)
        .await?
        .ok_or_else(not_found)?;

    if !can_view_project(user, &project) {
        return Err(not_found());
    }

    Ok(project)
}

/// Projects listed for the caller.
pub async fn visible_projects(
    pool: &sqlx::SqlitePool,
    user: &SessionUser,
) -> Result<Vec<Project>, AppError> {
    let projects = match user.role {
        UserRole::Admin | UserRole::Staff => db::projects::find_all(pool).await?,
        UserRole::Client => db::projects::find_by_client(pool, &user.user_id).await?,
    };
    Ok(projects)
}

/// Drop hidden milestones and tasks for client callers. Agency roles get the input back.
pub fn visible_milestones(
    user: &SessionUser,
    milestones: Vec<MilestoneWithTasks>,
) -> Vec<MilestoneWithTasks> {
    if user.role.is_agency() {
        return milestones;
    }
    milestones
        .into_iter()
        .filter(|m| m.milestone.is_visible)
        .map(|mut m| {
            m.tasks.retain(|t| t.is_visible);
            m
        })
        .collect()
}

/// Whether `role` may move a task from `from` to `to`. Only decides who may act;
/// the workflow itself is checked by `TaskStatus::transition_to`.
pub fn may_change_task_status(role: UserRole, from: TaskStatus, to: TaskStatus) -> bool {
    match role {
        UserRole::Admin | UserRole::Staff => true,
        UserRole::Client => {
            from == TaskStatus::Submitted
                && matches!(to, TaskStatus::Approved | TaskStatus::Rejected)
        }
    }
}

/// Reports are admin-only.
pub fn can_view_reports(user: &SessionUser) -> bool {
    match user.role {
        UserRole::Admin => true,
        UserRole::Staff | UserRole::Client => false,
    }
}
