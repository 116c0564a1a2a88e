//! Post service

use std::sync::Arc;
use social_shared::{PostId, UserId};
use tracing::info;
use validator::Validate;

use crate::clock::{Clock, SystemClock};
use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::repositories::{PostRepository, UserRepository};

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            posts,
            users,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish a post authored by `user_id`.
    pub async fn create(&self, user_id: UserId, post: &NewPost) -> Result<PostId, DomainError> {
        post.validate()?;

        let author = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?
            .username;

        let id = self.posts.create(user_id, &author, post, self.clock.now()).await?;
        info!("User {} created post {}", user_id, id);
        Ok(id)
    }

    /// Global feed, newest first.
    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemorySocialStore, ManualClock};
    use chrono::{Duration, TimeZone, Utc};

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "body".to_string(),
            categories: "general".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_newest_first() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        let svc = PostService::new(store.clone(), store.clone()).with_clock(clock.clone());

        svc.create(alice, &new_post("first")).await.unwrap();
        clock.advance(Duration::minutes(5));
        svc.create(alice, &new_post("second")).await.unwrap();

        let feed = svc.list_all().await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].title, "second");
        assert_eq!(feed[0].author, "alice");
        assert_eq!(feed[1].title, "first");
    }

    #[tokio::test]
    async fn test_create_requires_every_field() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let svc = PostService::new(store.clone(), store.clone());

        let mut post = new_post("title");
        post.categories = String::new();
        assert!(matches!(svc.create(alice, &post).await, Err(DomainError::ValidationError(_))));
        assert!(svc.list_all().await.unwrap().is_empty());
    }
}
