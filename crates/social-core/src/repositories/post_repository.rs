//! Post repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use social_shared::{PostId, UserId};
use crate::domain::{NewPost, Post, UserPost};
use crate::error::DomainError;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(
        &self,
        user_id: UserId,
        author: &str,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, DomainError>;

    /// Every post, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;

    /// Posts of one user with like counts, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<UserPost>, DomainError>;
}
