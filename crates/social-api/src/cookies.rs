//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::state::CookieSettings;

/// Create session cookie.
pub fn session_cookie(settings: &CookieSettings, token: &str) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token.to_string()))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(settings.max_age.num_seconds()))
        .build()
}

/// Create removal cookie for session.
pub fn clear_session_cookie(settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), ""))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
