use axum::Router;
use sqlx::SqlitePool;

/// Human-readable application name, used in logs and seeds.
pub const APP_NAME: &str = "Studio Ledger";

/// Shared state available to all handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: config::Config,
}

/// API routes (projects, tasks, reports). Merged into the root router in lib.rs.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(features::projects::routes())
        .merge(features::tasks::routes())
        .merge(features::reports::routes())
}

pub mod access;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod session;
