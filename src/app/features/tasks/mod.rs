pub mod update_status;

use axum::Router;

use crate::app::AppState;

/// Task API routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(update_status::routes())
}
