use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::Error as SqlxError;

use crate::app::domain::InvalidTransition;
use crate::app::features::reports::payments::ReportError;

/// Application error type for unified error handling across the app.
#[derive(Debug)]
pub enum AppError {
    /// Validation errors (400 Bad Request) - malformed request body
    Validation(String),

    /// Out-of-range query parameters (400 Bad Request), e.g. month = 13
    InvalidParameter(String),

    /// Task status change outside the workflow (409 Conflict)
    InvalidTransition(InvalidTransition),

    /// The record changed underneath the request (409 Conflict)
    Conflict(String),

    /// Missing or not visible to the caller (404 Not Found)
    NotFound(String),

    /// No valid session (401 Unauthorized)
    Unauthorized,

    /// Database errors (500 Internal Server Error)
    Database(SqlxError),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<InvalidTransition> for AppError {
    fn from(err: InvalidTransition) -> Self {
        AppError::InvalidTransition(err)
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::InvalidParameter(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) | AppError::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::InvalidTransition(err) => (
                StatusCode::CONFLICT,
                json!({
                    "error": err.to_string(),
                    "from": err.from,
                    "to": err.to,
                }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" })),
            AppError::Database(err) => {
                tracing::error!(%err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
