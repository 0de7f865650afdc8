mod handler;
pub mod payments;

use axum::Router;

use crate::app::AppState;

/// Reporting routes (admin only).
pub fn routes() -> Router<AppState> {
    Router::new().merge(handler::routes())
}
