use sqlx::FromRow;
use time::OffsetDateTime;

use crate::app::domain::{Email, ProjectStatus, UserId, UserRole};

/// Database row for users table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Data structure for inserting a new user.
pub struct NewUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
}

/// A client together with the project of theirs that changed most recently.
#[derive(Debug, Clone, FromRow)]
pub struct ClientLatestProject {
    pub client_id: String,
    pub client_name: String,
    pub client_email: String,
    pub project_id: String,
    pub project_slug: String,
    pub project_title: String,
    pub project_status: ProjectStatus,
    pub project_updated_at: i64,
}

/// Insert a new user into the database.
pub async fn insert<'e, E>(
    executor: E,
    user: &NewUser,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query(
        "INSERT INTO users (id, name, email, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user.id.as_str())
    .bind(&user.name)
    .bind(user.email.as_str())
    .bind(user.role)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Find a user by email address.
pub async fn find_by_email<'e, E>(
    executor: E,
    email: &Email,
) -> Result<Option<User>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, role, created_at, updated_at FROM users WHERE email = ?",
    )
    .bind(email.as_str())
    .fetch_optional(executor)
    .await
}

/// Every user with the client role referenced by at least one project, each with their most recently
/// updated project. Ordered by client name.
pub async fn find_clients_with_latest_project(
    pool: &sqlx::SqlitePool,
) -> Result<Vec<ClientLatestProject>, sqlx::Error> {
    sqlx::query_as::<_, ClientLatestProject>(
        r#"
        SELECT
            u.id AS client_id,
            u.name AS client_name,
            u.email AS client_email,
            p.id AS project_id,
            p.slug AS project_slug,
            p.title AS project_title,
            p.status AS project_status,
            p.updated_at AS project_updated_at
        FROM users u
        JOIN (
            SELECT id, slug, title, status, updated_at, client_id,
                   ROW_NUMBER() OVER (PARTITION BY client_id ORDER BY updated_at DESC, id DESC) AS rn
            FROM projects
            WHERE client_id IS NOT NULL
        ) p ON p.client_id = u.id AND p.rn = 1
        WHERE u.role = 'client'
        ORDER BY u.name, u.id
        "#,
    )
    .fetch_all(pool)
    .await
}
