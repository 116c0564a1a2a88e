//! In-memory repository fakes and a manual clock for tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use social_shared::{PostId, UserId};
use std::collections::{BTreeSet, HashMap};

use crate::clock::Clock;
use crate::domain::{
    Activity, ActivityKind, Comment, FollowEdge, NewComment, NewPost, NewUser, Post, Session, User,
    UserCredentials, UserPost, UserSummary,
};
use crate::error::DomainError;
use crate::repositories::{
    ActivityRepository, CommentRepository, FollowRepository, PostRepository, SessionRepository,
    UserRepository,
};

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Session table kept in a map, same filtering rules as the SQL adapter.
#[derive(Default)]
pub struct InMemorySessionRepository {
    rows: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a row directly, bypassing the session manager.
    pub fn seed(&self, session: Session) {
        self.rows.lock().insert(session.token.clone(), session);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let mut rows = self.rows.lock();
        if rows.contains_key(&session.token) {
            return Err(DomainError::SessionTokenConflict);
        }
        rows.insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_active(&self, token: &str, not_before: DateTime<Utc>) -> Result<Option<Session>, DomainError> {
        Ok(self
            .rows
            .lock()
            .get(token)
            .filter(|s| s.created_at > not_before)
            .cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), DomainError> {
        self.rows.lock().remove(token);
        Ok(())
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|_, s| s.created_at > cutoff);
        Ok((before - rows.len()) as u64)
    }
}

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct SocialTables {
    users: Vec<StoredUser>,
    follows: BTreeSet<(UserId, UserId)>,
    posts: Vec<Post>,
    likes: Vec<(PostId, UserId)>,
    comments: Vec<Comment>,
    activity: Vec<(UserId, Activity)>,
}

/// Users, follows, posts, comments and activity in one shared fake, so that
/// joins such as follower summaries behave like the SQL adapter.
#[derive(Default)]
pub struct InMemorySocialStore {
    tables: Mutex<SocialTables>,
}

impl InMemorySocialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly and return its id.
    pub fn add_user(&self, username: &str, is_private: bool) -> UserId {
        let mut tables = self.tables.lock();
        let id = tables.users.len() as UserId + 1;
        tables.users.push(StoredUser {
            user: User {
                id,
                username: username.to_string(),
                email: format!("{}@example.com", username),
                first_name: username.to_string(),
                last_name: "Tester".to_string(),
                date_of_birth: None,
                bio: String::new(),
                is_private,
                created_at: Utc::now(),
            },
            password_hash: String::new(),
        });
        id
    }

    pub fn set_password_hash(&self, id: UserId, hash: String) {
        let mut tables = self.tables.lock();
        if let Some(stored) = tables.users.iter_mut().find(|u| u.user.id == id) {
            stored.password_hash = hash;
        }
    }

    pub fn add_follow(&self, follower_id: UserId, following_id: UserId) {
        self.tables.lock().follows.insert((follower_id, following_id));
    }

    pub fn add_like(&self, post_id: PostId, user_id: UserId) {
        self.tables.lock().likes.push((post_id, user_id));
    }

    pub fn activity_count(&self, user_id: UserId) -> usize {
        self.tables.lock().activity.iter().filter(|(u, _)| *u == user_id).count()
    }

    fn summary(tables: &SocialTables, id: UserId) -> Option<UserSummary> {
        tables.users.iter().find(|u| u.user.id == id).map(|u| UserSummary {
            id,
            username: u.user.username.clone(),
            firstname: u.user.first_name.clone(),
            lastname: u.user.last_name.clone(),
        })
    }
}

#[async_trait]
impl UserRepository for InMemorySocialStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.tables.lock().users.iter().find(|u| u.user.id == id).map(|u| u.user.clone()))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .tables
            .lock()
            .users
            .iter()
            .find(|u| u.user.username == username)
            .map(|u| UserCredentials {
                user_id: u.user.id,
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn find_privacy(&self, id: UserId) -> Result<Option<bool>, DomainError> {
        Ok(self.tables.lock().users.iter().find(|u| u.user.id == id).map(|u| u.user.is_private))
    }

    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.tables.lock().users.iter().any(|u| u.user.id == id))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> Result<UserId, DomainError> {
        let mut tables = self.tables.lock();
        if tables.users.iter().any(|u| u.user.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists(user.username.clone()));
        }
        if tables.users.iter().any(|u| u.user.email == user.email) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        let id = tables.users.len() as UserId + 1;
        tables.users.push(StoredUser {
            user: User {
                id,
                username: user.username.clone(),
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                date_of_birth: Some(user.date_of_birth.clone()),
                bio: user.bio.clone(),
                is_private: false,
                created_at: Utc::now(),
            },
            password_hash: password_hash.to_string(),
        });
        Ok(id)
    }

    async fn update_privacy(&self, id: UserId, is_private: bool) -> Result<(), DomainError> {
        let mut tables = self.tables.lock();
        match tables.users.iter_mut().find(|u| u.user.id == id) {
            Some(stored) => {
                stored.user.is_private = is_private;
                Ok(())
            }
            None => Err(DomainError::UserNotFound),
        }
    }
}

#[async_trait]
impl FollowRepository for InMemorySocialStore {
    async fn exists(&self, follower_id: UserId, following_id: UserId) -> Result<bool, DomainError> {
        Ok(self.tables.lock().follows.contains(&(follower_id, following_id)))
    }

    async fn insert(&self, edge: &FollowEdge) -> Result<bool, DomainError> {
        Ok(self.tables.lock().follows.insert((edge.follower_id, edge.following_id)))
    }

    async fn delete(&self, follower_id: UserId, following_id: UserId) -> Result<bool, DomainError> {
        Ok(self.tables.lock().follows.remove(&(follower_id, following_id)))
    }

    async fn followers_of(&self, user_id: UserId) -> Result<Vec<UserSummary>, DomainError> {
        let tables = self.tables.lock();
        Ok(tables
            .follows
            .iter()
            .filter(|(_, following)| *following == user_id)
            .filter_map(|(follower, _)| Self::summary(&tables, *follower))
            .collect())
    }

    async fn following_of(&self, user_id: UserId) -> Result<Vec<UserSummary>, DomainError> {
        let tables = self.tables.lock();
        Ok(tables
            .follows
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .filter_map(|(_, following)| Self::summary(&tables, *following))
            .collect())
    }
}

#[async_trait]
impl PostRepository for InMemorySocialStore {
    async fn create(
        &self,
        user_id: UserId,
        author: &str,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, DomainError> {
        let mut tables = self.tables.lock();
        let id = tables.posts.len() as PostId + 1;
        tables.posts.push(Post {
            id,
            user_id,
            author: author.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            categories: post.categories.clone(),
            creation_date: created_at,
        });
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.tables.lock().posts.clone();
        posts.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        Ok(posts)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<UserPost>, DomainError> {
        let tables = self.tables.lock();
        let mut posts: Vec<UserPost> = tables
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| UserPost {
                id: p.id,
                user_id: p.user_id,
                content: p.content.clone(),
                created_at: p.creation_date,
                username: p.author.clone(),
                likes: tables.likes.iter().filter(|(post, _)| *post == p.id).count() as i64,
            })
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl CommentRepository for InMemorySocialStore {
    async fn create(&self, comment: &NewComment, author: &str, created_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.tables.lock().comments.push(Comment {
            post_id: comment.post_id,
            author: author.to_string(),
            content: comment.content.clone(),
            creation_date: created_at,
        });
        Ok(())
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .tables
            .lock()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
        Ok(comments)
    }
}

#[async_trait]
impl ActivityRepository for InMemorySocialStore {
    async fn record(
        &self,
        user_id: UserId,
        kind: ActivityKind,
        target_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.lock();
        let id = tables.activity.len() as i64 + 1;
        tables.activity.push((
            user_id,
            Activity {
                id,
                kind: kind.as_str().to_string(),
                content: kind.description().to_string(),
                created_at,
                target_id,
            },
        ));
        Ok(())
    }

    async fn recent(&self, user_id: UserId, limit: i64) -> Result<Vec<Activity>, DomainError> {
        let tables = self.tables.lock();
        let mut entries: Vec<Activity> = tables
            .activity
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, a)| a.clone())
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }
}
