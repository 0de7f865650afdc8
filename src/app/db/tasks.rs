use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::app::domain::TaskStatus;

/// Database row for tasks table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: String,
    pub milestone_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub is_visible: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A task with the project it belongs to, for authorization checks.
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithProject {
    #[sqlx(flatten)]
    pub task: Task,
    pub project_id: String,
    pub milestone_is_visible: bool,
}

/// Data structure for inserting a new task.
pub struct NewTask {
    pub id: String,
    pub milestone_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub is_visible: bool,
}

/// Insert a new task into the database.
pub async fn insert<'e, E>(
    executor: E,
    task: &NewTask,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query(
        "INSERT INTO tasks (id, milestone_id, title, status, is_visible, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&task.id)
    .bind(&task.milestone_id)
    .bind(&task.title)
    .bind(task.status)
    .bind(task.is_visible)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Find a task by ID together with its project and milestone visibility.
pub async fn find_with_project(
    pool: &sqlx::SqlitePool,
    id: &str,
) -> Result<Option<TaskWithProject>, sqlx::Error> {
    sqlx::query_as::<_, TaskWithProject>(
        r#"
        SELECT t.id, t.milestone_id, t.title, t.status, t.is_visible, t.created_at, t.updated_at,
               m.project_id, m.is_visible AS milestone_is_visible
        FROM tasks t
        JOIN milestones m ON m.id = t.milestone_id
        WHERE t.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// All tasks of a project, in milestone order then creation order.
pub async fn find_by_project(
    pool: &sqlx::SqlitePool,
    project_id: &str,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT t.id, t.milestone_id, t.title, t.status, t.is_visible, t.created_at, t.updated_at
        FROM tasks t
        JOIN milestones m ON m.id = t.milestone_id
        WHERE m.project_id = ?
        ORDER BY m.sort_order, m.created_at, t.created_at, t.rowid
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Write a status change only if the stored status is still `from`.
/// Returns false when the row was missing or moved on in the meantime.
pub async fn update_status<'e, E>(
    executor: E,
    id: &str,
    from: TaskStatus,
    to: TaskStatus,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let result = sqlx::query("UPDATE tasks SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now)
        .bind(id)
        .bind(from)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}
