//! Shared handler state

use std::sync::Arc;
use social_core::services::{AuthService, CommentService, PostService, ProfileService, SessionManager};
use social_shared::config::SessionSettings;

/// Session cookie attributes.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age: chrono::Duration,
}

impl From<&SessionSettings> for CookieSettings {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            name: settings.cookie_name.clone(),
            secure: settings.cookie_secure,
            max_age: settings.lifetime(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub cookie: CookieSettings,
}
