//! Comment service

use std::sync::Arc;
use social_shared::{PostId, UserId};
use tracing::info;
use validator::Validate;

use crate::clock::{Clock, SystemClock};
use crate::domain::{Comment, NewComment};
use crate::error::DomainError;
use crate::repositories::{CommentRepository, UserRepository};

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            comments,
            users,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn add(&self, user_id: UserId, comment: &NewComment) -> Result<(), DomainError> {
        comment.validate()?;

        let author = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?
            .username;

        self.comments.create(comment, &author, self.clock.now()).await?;
        info!("User {} commented on post {}", user_id, comment.post_id);
        Ok(())
    }

    /// Comments of `post_id`, newest first.
    pub async fn list(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        if post_id <= 0 {
            return Err(DomainError::ValidationError("Post ID is required".into()));
        }
        self.comments.list_for_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemorySocialStore, ManualClock};
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_add_and_list() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        let svc = CommentService::new(store.clone(), store.clone()).with_clock(clock.clone());

        for text in ["older", "newer"] {
            svc.add(alice, &NewComment { post_id: 3, content: text.to_string() })
                .await
                .unwrap();
            clock.advance(Duration::seconds(30));
        }
        svc.add(alice, &NewComment { post_id: 4, content: "elsewhere".to_string() })
            .await
            .unwrap();

        let comments = svc.list(3).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "newer");
        assert_eq!(comments[0].author, "alice");
    }

    #[tokio::test]
    async fn test_rejects_missing_post_id() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let svc = CommentService::new(store.clone(), store.clone());

        assert!(matches!(svc.list(0).await, Err(DomainError::ValidationError(_))));
        assert!(matches!(
            svc.add(alice, &NewComment { post_id: 0, content: "hi".to_string() }).await,
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            svc.add(alice, &NewComment { post_id: 1, content: String::new() }).await,
            Err(DomainError::ValidationError(_))
        ));
    }
}
