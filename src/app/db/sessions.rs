use sqlx::FromRow;
use time::OffsetDateTime;

use crate::app::domain::{UserId, UserRole};

/// A live session joined with the role of its user.
#[derive(Debug, Clone, FromRow)]
pub struct SessionUser {
    pub session_id: String,
    pub user_id: String,
    pub name: String,
    pub role: UserRole,
}

/// Create a new session for a user. Returns the session ID.
/// Login flows live outside this service; seeds and tests use this directly.
pub async fn create<'e, E>(
    executor: E,
    user_id: &UserId,
    expires_at: OffsetDateTime,
) -> Result<String, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let session_id = ulid::Ulid::new().to_string();
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query(
        "INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&session_id)
    .bind(user_id.as_str())
    .bind(expires_at.unix_timestamp())
    .bind(now)
    .execute(executor)
    .await?;

    Ok(session_id)
}

/// Resolve a non-expired session to its user and role in one query.
pub async fn find_valid_with_user(
    pool: &sqlx::SqlitePool,
    session_id: &str,
) -> Result<Option<SessionUser>, sqlx::Error> {
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query_as::<_, SessionUser>(
        r#"
        SELECT s.id AS session_id, u.id AS user_id, u.name, u.role
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.id = ? AND s.expires_at > ?
        "#,
    )
    .bind(session_id)
    .bind(now)
    .fetch_optional(pool)
    .await
}
