//! Session repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domain::Session;
use crate::error::DomainError;

/// Durable session table: `sessions(token, user_id, created_at)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fails with `SessionTokenConflict` when the token is already stored.
    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    /// Row for `token` with `created_at > not_before`, if any.
    async fn find_active(&self, token: &str, not_before: DateTime<Utc>) -> Result<Option<Session>, DomainError>;

    /// Deleting an absent token is not an error.
    async fn delete_by_token(&self, token: &str) -> Result<(), DomainError>;

    /// Removes rows with `created_at <= cutoff`, returns how many.
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
