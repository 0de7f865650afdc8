use std::env;

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};

use crate::app::db::{self, users::NewUser};
use crate::app::domain::{Email, UserId, UserRole};
use crate::seeds::{Seed, SeedOutcome};

/// Admin account for local development, driven by SEED_ADMIN_EMAIL.
/// Prints a session cookie so the API can be called without the portal's login.
pub struct DevAdminUser;

#[async_trait]
impl Seed for DevAdminUser {
    fn version(&self) -> i64 {
        20260301100000
    }

    fn description(&self) -> &str {
        "dev_admin_user"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
        let email = match env::var("SEED_ADMIN_EMAIL") {
            Ok(s) if !s.trim().is_empty() => s,
            _ => return Ok(SeedOutcome::Skipped),
        };
        let email = match Email::new(email) {
            Ok(e) => e,
            Err(_) => return Ok(SeedOutcome::Skipped),
        };

        let user_id = match db::users::find_by_email(pool, &email).await? {
            Some(existing) if existing.role == UserRole::Admin => {
                existing
                    .id
                    .parse::<UserId>()
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            }
            // Address taken by a non-admin; leave it alone.
            Some(_) => return Ok(SeedOutcome::Skipped),
            None => {
                let user_id = UserId::new();
                let name = env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Studio Admin".to_string());
                db::users::insert(
                    pool,
                    &NewUser {
                        id: user_id.clone(),
                        name,
                        email: email.clone(),
                        role: UserRole::Admin,
                    },
                )
                .await?;
                user_id
            }
        };

        let expires_at = OffsetDateTime::now_utc() + Duration::days(30);
        let session_id = db::sessions::create(pool, &user_id, expires_at).await?;

        eprintln!("Admin {}: session_id={}", email.as_str(), session_id);
        Ok(SeedOutcome::Applied)
    }
}
