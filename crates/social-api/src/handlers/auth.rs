// ============================================================================
// Social API - Auth Handlers
// File: crates/social-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, logout, session probe)

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use social_core::domain::{NewUser, User};
use social_shared::UserId;

use crate::cookies::{clear_session_cookie, session_cookie};
use crate::error::ApiError;
use crate::extractor::{resolve_session, CurrentUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Register handler - POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let user_id = state.auth.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            RegisterResponse { user_id },
            "User registered successfully",
        )),
    ))
}

/// Login handler - POST /api/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let result = state.auth.login(&payload.username, &payload.password).await?;
    let jar = jar.add(session_cookie(&state.cookie, &result.token));

    Ok((
        jar,
        Json(ApiResponse::success_with_message(
            LoginResponse { user_id: result.user_id },
            "Login successful",
        )),
    ))
}

/// Logout handler - POST /api/logout
///
/// Always clears the cookie; a missing or already expired session is not an
/// error.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>), ApiError> {
    if let Some(token) = jar.get(&state.cookie.name).map(|c| c.value().to_string()) {
        state.auth.logout(&token).await?;
    }

    let jar = jar.add(clear_session_cookie(&state.cookie));
    Ok((jar, Json(ApiResponse::success_with_message((), "Logged out successfully"))))
}

/// Session probe - GET /api/session
pub async fn session_status(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<SessionStatus>, ApiError> {
    let current = resolve_session(&state, &jar).await?;

    Ok(Json(SessionStatus {
        authenticated: current.is_some(),
        user_id: current.map(|c| c.user_id),
    }))
}

/// Caller's own record - GET /api/info
pub async fn info(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.auth.current_user(user.user_id).await?))
}
