use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::app::domain::ProjectStatus;

/// Database row for projects table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: ProjectStatus,
    pub client_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data structure for inserting a new project.
pub struct NewProject {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: ProjectStatus,
    pub client_id: Option<String>,
}

/// Insert a new project into the database.
pub async fn insert<'e, E>(
    executor: E,
    project: &NewProject,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query(
        "INSERT INTO projects (id, title, slug, status, client_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&project.id)
    .bind(&project.title)
    .bind(&project.slug)
    .bind(project.status)
    .bind(&project.client_id)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Find a project by ID.
pub async fn find_by_id(
    pool: &sqlx::SqlitePool,
    id: &str,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, title, slug, status, client_id, created_at, updated_at FROM projects WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Find a project by its slug.
pub async fn find_by_slug<'e, E>(
    executor: E,
    slug: &str,
) -> Result<Option<Project>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query_as::<_, Project>(
        "SELECT id, title, slug, status, client_id, created_at, updated_at FROM projects WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(executor)
    .await
}

/// All projects, most recently updated first.
pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, title, slug, status, client_id, created_at, updated_at FROM projects ORDER BY updated_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

/// Projects owned by one client, most recently updated first.
pub async fn find_by_client(
    pool: &sqlx::SqlitePool,
    client_id: &str,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, title, slug, status, client_id, created_at, updated_at FROM projects WHERE client_id = ? ORDER BY updated_at DESC, id DESC",
    )
    .bind(client_id)
    .fetch_all(pool)
    .await
}

/// Bump updated_at, e.g. after work on one of the project's tasks.
pub async fn touch<'e, E>(executor: E, id: &str) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query("UPDATE projects SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Set updated_at explicitly. Used by seeds to lay out history.
pub async fn set_updated_at<'e, E>(
    executor: E,
    id: &str,
    updated_at: i64,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query("UPDATE projects SET updated_at = ? WHERE id = ?")
        .bind(updated_at)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}
