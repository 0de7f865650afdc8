pub mod milestones;
pub mod projects;
pub mod sessions;
pub mod tasks;
pub mod users;

pub use milestones::{Milestone, MilestoneWithTasks, PaidMilestone};
pub use projects::Project;
pub use tasks::Task;
pub use users::{ClientLatestProject, User};

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::app::config::Config;

/// Open the pool and run embedded migrations. Every connection gets WAL, a busy
/// timeout and foreign key enforcement.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
