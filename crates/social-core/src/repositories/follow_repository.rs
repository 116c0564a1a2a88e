//! Follow repository trait (port)

use async_trait::async_trait;
use social_shared::UserId;
use crate::domain::{FollowEdge, UserSummary};
use crate::error::DomainError;

/// `followers(follower_id, following_id, created_at)`, unique on the pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn exists(&self, follower_id: UserId, following_id: UserId) -> Result<bool, DomainError>;
    /// Returns `false` when the edge was already present.
    async fn insert(&self, edge: &FollowEdge) -> Result<bool, DomainError>;
    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, follower_id: UserId, following_id: UserId) -> Result<bool, DomainError>;
    /// Users following `user_id`.
    async fn followers_of(&self, user_id: UserId) -> Result<Vec<UserSummary>, DomainError>;
    /// Users `user_id` follows.
    async fn following_of(&self, user_id: UserId) -> Result<Vec<UserSummary>, DomainError>;
}
