//! Comment repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use social_shared::PostId;
use crate::domain::{Comment, NewComment};
use crate::error::DomainError;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &NewComment, author: &str, created_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Comments of a post, newest first.
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError>;
}
