//! User repository trait (port)

use async_trait::async_trait;
use social_shared::UserId;
use crate::domain::{NewUser, User, UserCredentials};
use crate::error::DomainError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, DomainError>;
    /// `is_private` flag of the user, `None` when the user does not exist.
    async fn find_privacy(&self, id: UserId) -> Result<Option<bool>, DomainError>;
    async fn exists(&self, id: UserId) -> Result<bool, DomainError>;
    /// Fails with `UsernameAlreadyExists` / `EmailAlreadyExists` on duplicates.
    async fn create(&self, user: &NewUser, password_hash: &str) -> Result<UserId, DomainError>;
    async fn update_privacy(&self, id: UserId, is_private: bool) -> Result<(), DomainError>;
}
