mod demo_portfolio;
mod dev_admin_user;

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Outcome of running a seed. Skipped seeds are not recorded so they may run again later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied,
    /// Seed opted out (e.g. env not set); not recorded.
    Skipped,
}

/// Which already-applied seeds to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rerun {
    #[default]
    None,
    All,
    Version(i64),
}

impl Rerun {
    fn includes(self, version: i64) -> bool {
        match self {
            Rerun::None => false,
            Rerun::All => true,
            Rerun::Version(v) => v == version,
        }
    }
}

/// A database seed. Seeds run in version order and are tracked for idempotency.
#[async_trait]
pub trait Seed: Send + Sync {
    /// Unique version identifier (timestamp format: YYYYMMDDHHMMSS).
    fn version(&self) -> i64;

    fn description(&self) -> &str;

    /// Execute the seed through the db layer.
    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error>;
}

/// All seeds in execution order (sorted by version).
pub fn all_seeds() -> Vec<Box<dyn Seed>> {
    let mut seeds: Vec<Box<dyn Seed>> = vec![
        Box::new(dev_admin_user::DevAdminUser),
        Box::new(demo_portfolio::DemoPortfolio),
    ];
    seeds.sort_by_key(|s| s.version());
    seeds
}

/// Run pending seeds (plus any selected by `rerun`). Returns the descriptions of
/// the seeds that were applied.
pub async fn run_seeds(pool: &SqlitePool, rerun: Rerun) -> Result<Vec<String>, sqlx::Error> {
    ensure_seeds_table(pool).await?;
    let applied = applied_versions(pool).await?;

    let mut ran = Vec::new();
    for seed in all_seeds() {
        let version = seed.version();
        let already_applied = applied.contains(&version);
        let forced = rerun.includes(version);

        if already_applied && !forced {
            tracing::debug!(seed = seed.description(), "seed already applied");
            continue;
        }
        if already_applied {
            forget_seed(pool, version).await?;
        }

        match seed.run(pool).await? {
            SeedOutcome::Applied => {
                record_seed(pool, version, seed.description()).await?;
                tracing::info!(seed = seed.description(), "seed applied");
                ran.push(seed.description().to_string());
            }
            SeedOutcome::Skipped => {
                tracing::info!(seed = seed.description(), "seed skipped");
            }
        }
    }
    Ok(ran)
}

async fn ensure_seeds_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _studio_ledger_seeds (
            version INTEGER PRIMARY KEY NOT NULL,
            description TEXT NOT NULL,
            installed_on INTEGER NOT NULL DEFAULT (unixepoch())
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT version FROM _studio_ledger_seeds")
        .fetch_all(pool)
        .await
}

async fn record_seed(pool: &SqlitePool, version: i64, description: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO _studio_ledger_seeds (version, description) VALUES (?, ?)")
        .bind(version)
        .bind(description)
        .execute(pool)
        .await?;
    Ok(())
}

async fn forget_seed(pool: &SqlitePool, version: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM _studio_ledger_seeds WHERE version = ?")
        .bind(version)
        .execute(pool)
        .await?;
    Ok(())
}
