//! Authenticated caller extracted from the session cookie

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use social_shared::utils::mask_token;
use social_shared::UserId;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity behind a live session. Rejects with `401` when the cookie
/// is missing or the session is unknown or expired.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub token: String,
}

/// Resolve the session cookie in `jar`, if any.
pub async fn resolve_session(state: &AppState, jar: &CookieJar) -> Result<Option<CurrentUser>, ApiError> {
    let Some(token) = jar.get(&state.cookie.name).map(|c| c.value().to_string()) else {
        return Ok(None);
    };

    match state.sessions.resolve(&token).await? {
        Some(user_id) => Ok(Some(CurrentUser { user_id, token })),
        None => {
            debug!("No live session for token {}", mask_token(&token));
            Ok(None)
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        resolve_session(state, &jar)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("No valid session".to_string()))
    }
}
