//! Session lookup for API handlers. Sessions are issued by the portal's login
//! flow; here we only resolve the cookie to a user and role.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::app::{db::sessions::SessionUser, error::AppError, AppState};

/// Extractor for JSON endpoints. Rejects with 401 JSON when the session cookie
/// is missing, unknown or expired.
#[derive(Debug, Clone)]
pub struct ApiAuthenticatedSession(pub SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for ApiAuthenticatedSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(&state.config.session_cookie)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        crate::app::db::sessions::find_valid_with_user(&state.db, &session_id)
            .await?
            .map(ApiAuthenticatedSession)
            .ok_or(AppError::Unauthorized)
    }
}
