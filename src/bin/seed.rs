use std::env;

use dotenvy::dotenv;
use studio_ledger::app;
use studio_ledger::seeds::{self, Rerun};

/// Usage: seed [--force-all | --force <version>]
#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_PKG_NAME")).into()),
        )
        .init();

    let mut config = app::config::Config::from_env()
        .expect("Failed to load config (check DATABASE_URL and other env vars)");
    config.db_max_connections = 1;

    let pool = app::db::connect(&config)
        .await
        .expect("Failed to open database");

    let args: Vec<String> = env::args().collect();
    let rerun = if args.iter().any(|a| a == "--force-all") {
        Rerun::All
    } else {
        match args
            .iter()
            .position(|a| a == "--force")
            .and_then(|i| args.get(i + 1))
            .map(|s| s.parse::<i64>())
        {
            Some(Ok(version)) => Rerun::Version(version),
            Some(Err(_)) => {
                eprintln!("--force expects a seed version (YYYYMMDDHHMMSS)");
                std::process::exit(2);
            }
            None => Rerun::None,
        }
    };

    match seeds::run_seeds(&pool, rerun).await {
        Ok(applied) if applied.is_empty() => eprintln!("Nothing to seed"),
        Ok(applied) => eprintln!("Applied: {}", applied.join(", ")),
        Err(e) => {
            eprintln!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    }
}
