// ============================================================================
// Social Core - Authentication Service
// File: crates/social-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with login, register, and logout

use std::sync::Arc;
use social_security::PasswordService;
use social_shared::utils::mask_email;
use social_shared::UserId;
use tracing::{error, info, warn};
use validator::Validate;

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use super::session_manager::SessionManager;

/// Authentication service for handling user login/register flows
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<SessionManager>) -> Self {
        Self { users, sessions }
    }
    
    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for username: {}", username);

        if username.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError("Username and password are required".into()));
        }
        
        // 1. Find credentials
        let credentials = self.users.find_credentials(username).await?
            .ok_or_else(|| {
                warn!("Login failed: unknown username: {}", username);
                DomainError::InvalidCredentials
            })?;
        
        // 2. Verify password
        let password_valid = PasswordService::verify(password, &credentials.password_hash)
            .map_err(|e| {
                error!("Stored password hash for user {} is unusable: {}", credentials.user_id, e);
                DomainError::InvalidCredentials
            })?;
        
        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }
        
        // 3. Issue session
        let token = self.sessions.create_session(credentials.user_id).await?;
        
        info!("Login successful for: {}", username);
        
        Ok(LoginResult {
            user_id: credentials.user_id,
            token,
        })
    }
    
    /// Register a new user
    pub async fn register(&self, new_user: &NewUser) -> Result<UserId, DomainError> {
        info!("Registration attempt for email: {}", mask_email(&new_user.email));
        
        // 1. Validate input and password policy
        new_user.validate()?;
        PasswordService::check_strength(
            &new_user.password,
            &[new_user.username.as_str(), new_user.email.as_str()],
        )?;
        
        // 2. Hash password
        let password_hash = PasswordService::hash(&new_user.password)?;
        
        // 3. Save to database (duplicates surface as conflicts)
        let user_id = self.users.create(new_user, &password_hash).await.map_err(|e| {
            warn!("Registration failed for {}: {}", new_user.username, e);
            e
        })?;
        
        info!("Registration successful for user {}", user_id);
        Ok(user_id)
    }

    /// End the session behind `token`.
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.delete_session(token).await
    }

    /// Full record of the authenticated caller.
    pub async fn current_user(&self, user_id: UserId) -> Result<User, DomainError> {
        self.users.find_by_id(user_id).await?.ok_or(DomainError::UserNotFound)
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: UserId,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_manager::SessionPolicy;
    use crate::testing::{InMemorySessionRepository, InMemorySocialStore};

    const PASSWORD: &str = "violet-Otter-harbor-91";

    fn setup() -> (AuthService, Arc<InMemorySocialStore>, Arc<SessionManager>) {
        let store = Arc::new(InMemorySocialStore::new());
        let sessions = Arc::new(SessionManager::new(
            Arc::new(InMemorySessionRepository::new()),
            SessionPolicy::default(),
        ));
        (AuthService::new(store.clone(), sessions.clone()), store, sessions)
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: PASSWORD.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            bio: String::new(),
        }
    }

    #[tokio::test]
    async fn test_register_login_logout() {
        let (auth, _, sessions) = setup();
        let user_id = auth.register(&new_user("alice")).await.unwrap();

        let login = auth.login("alice", PASSWORD).await.unwrap();
        assert_eq!(login.user_id, user_id);
        assert_eq!(sessions.resolve(&login.token).await.unwrap(), Some(user_id));

        auth.logout(&login.token).await.unwrap();
        assert_eq!(sessions.resolve(&login.token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (auth, _, _) = setup();
        auth.register(&new_user("alice")).await.unwrap();

        assert!(matches!(
            auth.login("alice", "wrong-password").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", PASSWORD).await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("", "").await,
            Err(DomainError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_login_with_malformed_stored_hash() {
        let (auth, store, sessions) = setup();
        let id = store.add_user("carol", false);
        store.set_password_hash(id, "not-a-phc-string".to_string());

        assert!(matches!(
            auth.login("carol", PASSWORD).await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(sessions.cache().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (auth, _, _) = setup();
        auth.register(&new_user("alice")).await.unwrap();

        let mut duplicate = new_user("alice");
        duplicate.email = "other@example.com".to_string();
        assert!(matches!(
            auth.register(&duplicate).await,
            Err(DomainError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_register_enforces_password_policy() {
        let (auth, store, _) = setup();
        let mut weak = new_user("bob");
        weak.password = "password".to_string();

        assert!(matches!(auth.register(&weak).await, Err(DomainError::PasswordTooWeak)));
        assert!(matches!(
            UserRepository::find_credentials(store.as_ref(), "bob").await,
            Ok(None)
        ));
    }
}
