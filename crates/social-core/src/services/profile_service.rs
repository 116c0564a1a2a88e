//! Profile, relationship and activity service
//!
//! Every read goes through [`AccessControl::authorize`] so that the same
//! owner-or-follower rule guards profiles, follower lists, posts and the
//! activity history.

use std::sync::Arc;
use serde::Serialize;
use social_shared::constants::MAX_ACTIVITY_ENTRIES;
use social_shared::UserId;
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::{Activity, ActivityKind, FollowEdge, LimitedUser, User, UserPost, UserSummary};
use crate::error::DomainError;
use crate::repositories::{ActivityRepository, FollowRepository, PostRepository, UserRepository};
use super::access_control::{AccessControl, AccessLevel, Resource};

/// Profile as the viewer is allowed to see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProfileView {
    Full(User),
    Limited(LimitedUser),
}

/// Profile page payload: the user plus their posts, activity and relations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteProfile {
    pub user: User,
    pub posts: Vec<UserPost>,
    pub activity: Vec<Activity>,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
    pub is_own_profile: bool,
}

/// Profile page of a private user the viewer does not follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitedProfile {
    pub user: LimitedUser,
    pub is_own_profile: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompleteProfileView {
    Full(Box<CompleteProfile>),
    Limited(LimitedProfile),
}

/// Outcome of a follow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowOutcome {
    /// `false` when the edge already existed.
    pub created: bool,
}

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    posts: Arc<dyn PostRepository>,
    activity: Arc<dyn ActivityRepository>,
    access: AccessControl,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        posts: Arc<dyn PostRepository>,
        activity: Arc<dyn ActivityRepository>,
    ) -> Self {
        let access = AccessControl::new(users.clone(), follows.clone());
        Self {
            users,
            follows,
            posts,
            activity,
            access,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    async fn load_user(&self, id: UserId) -> Result<User, DomainError> {
        self.users.find_by_id(id).await?.ok_or(DomainError::UserNotFound)
    }

    /// Full or limited profile of `subject`.
    pub async fn get_profile(&self, viewer: UserId, subject: UserId) -> Result<ProfileView, DomainError> {
        let user = self.load_user(subject).await?;

        match self.access.evaluate(viewer, subject, user.is_private).await? {
            AccessLevel::FullView => Ok(ProfileView::Full(user)),
            AccessLevel::LimitedView => Ok(ProfileView::Limited(LimitedUser::from(&user))),
        }
    }

    pub async fn complete_profile(
        &self,
        viewer: UserId,
        subject: UserId,
    ) -> Result<CompleteProfileView, DomainError> {
        let user = self.load_user(subject).await?;
        let is_own_profile = viewer == subject;

        if self.access.evaluate(viewer, subject, user.is_private).await? == AccessLevel::LimitedView {
            return Ok(CompleteProfileView::Limited(LimitedProfile {
                user: LimitedUser::from(&user),
                is_own_profile,
            }));
        }

        let posts = self.posts.list_by_user(subject).await?;
        let activity = self.activity.recent(subject, MAX_ACTIVITY_ENTRIES).await?;
        let followers = self.follows.followers_of(subject).await?;
        let following = self.follows.following_of(subject).await?;

        Ok(CompleteProfileView::Full(Box::new(CompleteProfile {
            user,
            posts,
            activity,
            followers,
            following,
            is_own_profile,
        })))
    }

    pub async fn update_privacy(&self, user_id: UserId, is_private: bool) -> Result<(), DomainError> {
        self.users.update_privacy(user_id, is_private).await?;
        info!("User {} set profile private={}", user_id, is_private);
        Ok(())
    }

    pub async fn followers(&self, viewer: UserId, subject: UserId) -> Result<Vec<UserSummary>, DomainError> {
        self.access.authorize(viewer, subject, Resource::Followers).await?;
        self.follows.followers_of(subject).await
    }

    pub async fn following(&self, viewer: UserId, subject: UserId) -> Result<Vec<UserSummary>, DomainError> {
        self.access.authorize(viewer, subject, Resource::Following).await?;
        self.follows.following_of(subject).await
    }

    pub async fn user_posts(&self, viewer: UserId, subject: UserId) -> Result<Vec<UserPost>, DomainError> {
        self.access.authorize(viewer, subject, Resource::Posts).await?;
        self.posts.list_by_user(subject).await
    }

    pub async fn user_activity(&self, viewer: UserId, subject: UserId) -> Result<Vec<Activity>, DomainError> {
        self.access.authorize(viewer, subject, Resource::Activity).await?;
        self.activity.recent(subject, MAX_ACTIVITY_ENTRIES).await
    }

    /// Create the edge `follower -> target`. Following twice is not an error.
    pub async fn follow(&self, follower: UserId, target: UserId) -> Result<FollowOutcome, DomainError> {
        let now = self.clock.now();
        let edge = FollowEdge::new(follower, target, now)?;

        if !self.users.exists(target).await? {
            return Err(DomainError::UserNotFound);
        }

        let created = self.follows.insert(&edge).await?;
        if created {
            info!("User {} followed user {}", follower, target);
            self.record_activity(follower, ActivityKind::Follow, target).await;
        }

        Ok(FollowOutcome { created })
    }

    /// Remove the edge `follower -> target`; removing a missing edge succeeds.
    pub async fn unfollow(&self, follower: UserId, target: UserId) -> Result<(), DomainError> {
        if self.follows.delete(follower, target).await? {
            info!("User {} unfollowed user {}", follower, target);
            self.record_activity(follower, ActivityKind::Unfollow, target).await;
        }
        Ok(())
    }

    pub async fn follow_status(&self, follower: UserId, target: UserId) -> Result<bool, DomainError> {
        self.follows.exists(follower, target).await
    }

    // Activity history is best-effort: the follow change already happened.
    async fn record_activity(&self, user_id: UserId, kind: ActivityKind, target: UserId) {
        if let Err(e) = self
            .activity
            .record(user_id, kind, Some(target), self.clock.now())
            .await
        {
            warn!("Failed to record {} activity for user {}: {}", kind.as_str(), user_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::activity_repository::MockActivityRepository;
    use crate::testing::InMemorySocialStore;

    fn service(store: &Arc<InMemorySocialStore>) -> ProfileService {
        ProfileService::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_profile_full_and_limited() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let nora = store.add_user("nora", true);
        let svc = service(&store);

        assert!(matches!(svc.get_profile(alice, nora).await.unwrap(), ProfileView::Limited(_)));
        assert!(matches!(svc.get_profile(nora, nora).await.unwrap(), ProfileView::Full(_)));
        assert!(matches!(svc.get_profile(nora, alice).await.unwrap(), ProfileView::Full(_)));

        store.add_follow(alice, nora);
        assert!(matches!(svc.get_profile(alice, nora).await.unwrap(), ProfileView::Full(_)));
    }

    #[tokio::test]
    async fn test_profile_unknown_user() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let svc = service(&store);

        assert!(matches!(svc.get_profile(alice, 404).await, Err(DomainError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_complete_profile() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let nora = store.add_user("nora", true);
        let svc = service(&store);

        match svc.complete_profile(alice, nora).await.unwrap() {
            CompleteProfileView::Limited(limited) => {
                assert_eq!(limited.user.id, nora);
                assert!(!limited.is_own_profile);
            }
            other => panic!("expected limited payload, got {:?}", other),
        }

        svc.follow(alice, nora).await.unwrap();
        match svc.complete_profile(alice, nora).await.unwrap() {
            CompleteProfileView::Full(profile) => {
                assert_eq!(profile.followers.len(), 1);
                assert_eq!(profile.followers[0].id, alice);
                assert!(profile.following.is_empty());
                assert!(!profile.is_own_profile);
            }
            other => panic!("expected full payload, got {:?}", other),
        }

        match svc.complete_profile(alice, alice).await.unwrap() {
            CompleteProfileView::Full(profile) => {
                assert!(profile.is_own_profile);
                assert_eq!(profile.activity.len(), 1);
                assert_eq!(profile.activity[0].kind, "follow");
            }
            other => panic!("expected full payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hard_denied_resources() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let nora = store.add_user("nora", true);
        let svc = service(&store);

        assert!(matches!(svc.followers(alice, nora).await, Err(DomainError::Forbidden(_))));
        assert!(matches!(svc.following(alice, nora).await, Err(DomainError::Forbidden(_))));
        assert!(matches!(svc.user_posts(alice, nora).await, Err(DomainError::Forbidden(_))));
        assert!(matches!(svc.user_activity(alice, nora).await, Err(DomainError::Forbidden(_))));

        // Public subject and own resources stay readable
        assert!(svc.followers(nora, alice).await.is_ok());
        assert!(svc.user_activity(nora, nora).await.is_ok());
    }

    #[tokio::test]
    async fn test_privacy_toggle_changes_access() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let bob = store.add_user("bob", false);
        let svc = service(&store);

        assert!(svc.user_posts(bob, alice).await.is_ok());
        svc.update_privacy(alice, true).await.unwrap();
        assert!(matches!(svc.user_posts(bob, alice).await, Err(DomainError::Forbidden(_))));
        svc.update_privacy(alice, false).await.unwrap();
        assert!(svc.user_posts(bob, alice).await.is_ok());
    }

    #[tokio::test]
    async fn test_follow_rules() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let bob = store.add_user("bob", false);
        let svc = service(&store);

        assert!(matches!(svc.follow(alice, alice).await, Err(DomainError::CannotFollowSelf)));
        assert!(matches!(svc.follow(alice, 404).await, Err(DomainError::UserNotFound)));

        assert!(svc.follow(alice, bob).await.unwrap().created);
        assert!(!svc.follow(alice, bob).await.unwrap().created);
        assert!(svc.follow_status(alice, bob).await.unwrap());
        assert!(!svc.follow_status(bob, alice).await.unwrap());
        assert_eq!(store.activity_count(alice), 1);

        svc.unfollow(alice, bob).await.unwrap();
        svc.unfollow(alice, bob).await.unwrap();
        assert!(!svc.follow_status(alice, bob).await.unwrap());
        assert_eq!(store.activity_count(alice), 2);
    }

    #[tokio::test]
    async fn test_activity_failure_does_not_fail_follow() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let bob = store.add_user("bob", false);

        let mut activity = MockActivityRepository::new();
        activity
            .expect_record()
            .times(1)
            .returning(|_, _, _, _| Err(DomainError::DatabaseError("disk full".into())));

        let svc = ProfileService::new(store.clone(), store.clone(), store.clone(), Arc::new(activity));

        let outcome = svc.follow(alice, bob).await.unwrap();
        assert!(outcome.created);
        assert!(svc.follow_status(alice, bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_activity_is_capped() {
        let store = Arc::new(InMemorySocialStore::new());
        let alice = store.add_user("alice", false);
        let bob = store.add_user("bob", false);
        let svc = service(&store);

        for _ in 0..30 {
            svc.follow(alice, bob).await.unwrap();
            svc.unfollow(alice, bob).await.unwrap();
        }

        let entries = svc.user_activity(alice, alice).await.unwrap();
        assert_eq!(entries.len(), MAX_ACTIVITY_ENTRIES as usize);
        assert_eq!(entries[0].kind, "unfollow");
    }
}
