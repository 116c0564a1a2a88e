//! Domain services (business logic)

pub mod session_cache;
pub mod session_manager;
pub mod access_control;
pub mod auth_service;
pub mod profile_service;
pub mod post_service;
pub mod comment_service;

pub use session_cache::{CachedSession, SessionCache};
pub use session_manager::{spawn_expiry_sweeper, SessionManager, SessionPolicy};
pub use access_control::{decide, decide_async, AccessControl, AccessLevel, Disclosure, Resource};
pub use auth_service::{AuthService, LoginResult};
pub use profile_service::{
    CompleteProfile, CompleteProfileView, FollowOutcome, LimitedProfile, ProfileService, ProfileView,
};
pub use post_service::PostService;
pub use comment_service::CommentService;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemorySessionRepository, InMemorySocialStore};
    use social_security::PasswordService;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_login_follow_logout_flow() {
        let store = Arc::new(InMemorySocialStore::new());
        for n in 1..=12 {
            store.add_user(&format!("user{}", n), n == 9);
        }
        store.set_password_hash(7, PasswordService::hash("seven-Lanterns-drift").unwrap());

        let sessions = Arc::new(SessionManager::new(
            Arc::new(InMemorySessionRepository::new()),
            SessionPolicy::default(),
        ));
        let auth = AuthService::new(store.clone(), sessions.clone());
        let profiles = ProfileService::new(store.clone(), store.clone(), store.clone(), store.clone());

        // User 7 logs in and the token resolves back to 7
        let login = auth.login("user7", "seven-Lanterns-drift").await.unwrap();
        assert_eq!(sessions.resolve(&login.token).await.unwrap(), Some(7));

        // 7 follows the private user 9 and gets the full view
        profiles.follow(7, 9).await.unwrap();
        assert_eq!(
            profiles.access().authorize(7, 9, Resource::Profile).await.unwrap(),
            AccessLevel::FullView
        );

        // 12 does not follow 9
        assert_eq!(
            profiles.access().authorize(12, 9, Resource::Profile).await.unwrap(),
            AccessLevel::LimitedView
        );

        auth.logout(&login.token).await.unwrap();
        assert_eq!(sessions.resolve(&login.token).await.unwrap(), None);
    }
}
