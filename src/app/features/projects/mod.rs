mod list;
pub mod progress;
mod show;
mod summary;
pub mod types;

use axum::Router;

use crate::app::AppState;

/// Project API routes (list, detail, summary, milestone progress).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(list::routes())
        .merge(show::routes())
        .merge(summary::routes())
}
