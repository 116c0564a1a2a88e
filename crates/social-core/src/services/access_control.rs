// ============================================================================
// Social Core - Access Control
// File: crates/social-core/src/services/access_control.rs
// ============================================================================
//! Owner-or-follower visibility rule shared by every profile-shaped resource.

use std::future::Future;
use std::sync::Arc;
use serde::Serialize;
use social_shared::UserId;
use tracing::{debug, warn};

use crate::error::DomainError;
use crate::repositories::{FollowRepository, UserRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    FullView,
    LimitedView,
}

/// Outcome that needs no follow lookup, if any.
fn decide_without_lookup(viewer: UserId, subject: UserId, subject_is_private: bool) -> Option<AccessLevel> {
    if viewer == subject || !subject_is_private {
        Some(AccessLevel::FullView)
    } else {
        None
    }
}

fn level_for(is_following: bool) -> AccessLevel {
    if is_following {
        AccessLevel::FullView
    } else {
        AccessLevel::LimitedView
    }
}

/// Self sees everything, public subjects are fully visible, private subjects
/// are fully visible to followers only. `is_following(viewer, subject)` is
/// called only for the private, non-self case.
pub fn decide<F>(viewer: UserId, subject: UserId, subject_is_private: bool, is_following: F) -> AccessLevel
where
    F: FnOnce(UserId, UserId) -> bool,
{
    decide_without_lookup(viewer, subject, subject_is_private)
        .unwrap_or_else(|| level_for(is_following(viewer, subject)))
}

/// [`decide`] with a fallible async follow lookup. Lookup errors propagate.
pub async fn decide_async<F, Fut, E>(
    viewer: UserId,
    subject: UserId,
    subject_is_private: bool,
    is_following: F,
) -> Result<AccessLevel, E>
where
    F: FnOnce(UserId, UserId) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    match decide_without_lookup(viewer, subject, subject_is_private) {
        Some(level) => Ok(level),
        None => Ok(level_for(is_following(viewer, subject).await?)),
    }
}

/// What a resource shows a viewer who only has [`AccessLevel::LimitedView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Respond with the limited projection.
    Limited,
    /// Respond with `Forbidden`.
    Deny,
}

/// Profile-shaped resources guarded by [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Profile,
    CompleteProfile,
    Followers,
    Following,
    Posts,
    Activity,
}

impl Resource {
    /// Single source for the limited-view policy: profile pages degrade,
    /// relationship and content listings refuse.
    pub fn disclosure_on_limited(self) -> Disclosure {
        match self {
            Resource::Profile | Resource::CompleteProfile => Disclosure::Limited,
            Resource::Followers | Resource::Following | Resource::Posts | Resource::Activity => {
                Disclosure::Deny
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::CompleteProfile => "complete profile",
            Resource::Followers => "followers",
            Resource::Following => "following",
            Resource::Posts => "posts",
            Resource::Activity => "activity",
        }
    }
}

/// Access control service: looks up the subject's privacy flag and the
/// follow edge, then applies [`decide`] and the resource's disclosure policy.
pub struct AccessControl {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl AccessControl {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    /// Level for a subject whose privacy flag the caller already holds.
    pub async fn evaluate(
        &self,
        viewer: UserId,
        subject: UserId,
        subject_is_private: bool,
    ) -> Result<AccessLevel, DomainError> {
        let follows = self.follows.clone();
        let level = decide_async(viewer, subject, subject_is_private, |v, s| async move {
            follows.exists(v, s).await
        })
        .await?;

        debug!("Viewer {} has {:?} on user {}", viewer, level, subject);
        Ok(level)
    }

    /// Level for `subject` on `resource`; `Forbidden` where the resource
    /// refuses limited viewers, `UserNotFound` for unknown subjects.
    pub async fn authorize(
        &self,
        viewer: UserId,
        subject: UserId,
        resource: Resource,
    ) -> Result<AccessLevel, DomainError> {
        let is_private = if viewer == subject {
            false
        } else {
            self.users
                .find_privacy(subject)
                .await?
                .ok_or(DomainError::UserNotFound)?
        };

        let level = self.evaluate(viewer, subject, is_private).await?;
        if level == AccessLevel::LimitedView && resource.disclosure_on_limited() == Disclosure::Deny {
            warn!("User {} denied {} of private user {}", viewer, resource.as_str(), subject);
            return Err(DomainError::Forbidden(format!(
                "Unauthorized to view the {} of this private profile",
                resource.as_str()
            )));
        }
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::follow_repository::MockFollowRepository;
    use crate::testing::InMemorySocialStore;
    use std::cell::Cell;

    const SELF_ID: UserId = 7;
    const OTHER_ID: UserId = 9;

    #[test]
    fn test_truth_table() {
        // (viewer, subject, private, following) -> expected
        let cases = [
            (SELF_ID, SELF_ID, false, false, AccessLevel::FullView),
            (SELF_ID, SELF_ID, false, true, AccessLevel::FullView),
            (SELF_ID, SELF_ID, true, false, AccessLevel::FullView),
            (SELF_ID, SELF_ID, true, true, AccessLevel::FullView),
            (SELF_ID, OTHER_ID, false, false, AccessLevel::FullView),
            (SELF_ID, OTHER_ID, false, true, AccessLevel::FullView),
            (SELF_ID, OTHER_ID, true, true, AccessLevel::FullView),
            (SELF_ID, OTHER_ID, true, false, AccessLevel::LimitedView),
        ];

        for (viewer, subject, private, following, expected) in cases {
            let level = decide(viewer, subject, private, |_, _| following);
            assert_eq!(
                level, expected,
                "viewer={} subject={} private={} following={}",
                viewer, subject, private, following
            );
        }
    }

    #[test]
    fn test_follow_lookup_only_for_private_other() {
        let calls = Cell::new(0);
        let count = |_: UserId, _: UserId| {
            calls.set(calls.get() + 1);
            true
        };

        decide(SELF_ID, SELF_ID, true, count);
        decide(SELF_ID, OTHER_ID, false, count);
        assert_eq!(calls.get(), 0);

        decide(SELF_ID, OTHER_ID, true, count);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_lookup_receives_viewer_then_subject() {
        decide(12, 9, true, |viewer, subject| {
            assert_eq!((viewer, subject), (12, 9));
            false
        });
    }

    #[test]
    fn test_disclosure_policy() {
        assert_eq!(Resource::Profile.disclosure_on_limited(), Disclosure::Limited);
        assert_eq!(Resource::CompleteProfile.disclosure_on_limited(), Disclosure::Limited);
        for resource in [Resource::Followers, Resource::Following, Resource::Posts, Resource::Activity] {
            assert_eq!(resource.disclosure_on_limited(), Disclosure::Deny);
        }
    }

    #[tokio::test]
    async fn test_decide_async_propagates_lookup_error() {
        let result: Result<AccessLevel, &str> =
            decide_async(SELF_ID, OTHER_ID, true, |_, _| async { Err("db down") }).await;
        assert_eq!(result, Err("db down"));

        let result: Result<AccessLevel, &str> =
            decide_async(SELF_ID, OTHER_ID, false, |_, _| async { Err("db down") }).await;
        assert_eq!(result, Ok(AccessLevel::FullView));
    }

    #[tokio::test]
    async fn test_authorize_private_subject() {
        let store = Arc::new(InMemorySocialStore::new());
        let owner = store.add_user("nora", true);
        let follower = store.add_user("sam", false);
        let stranger = store.add_user("lee", false);
        store.add_follow(follower, owner);
        let access = AccessControl::new(store.clone(), store.clone());

        assert_eq!(
            access.authorize(follower, owner, Resource::Followers).await.unwrap(),
            AccessLevel::FullView
        );
        assert_eq!(
            access.authorize(stranger, owner, Resource::Profile).await.unwrap(),
            AccessLevel::LimitedView
        );
        assert!(matches!(
            access.authorize(stranger, owner, Resource::Posts).await,
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(
            access.authorize(owner, owner, Resource::Activity).await.unwrap(),
            AccessLevel::FullView
        );
    }

    #[tokio::test]
    async fn test_authorize_unknown_subject() {
        let store = Arc::new(InMemorySocialStore::new());
        let viewer = store.add_user("sam", false);
        let access = AccessControl::new(store.clone(), store.clone());

        assert!(matches!(
            access.authorize(viewer, 404, Resource::Profile).await,
            Err(DomainError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_follow_lookup_failure_is_not_treated_as_limited() {
        let store = Arc::new(InMemorySocialStore::new());
        let owner = store.add_user("nora", true);
        let viewer = store.add_user("sam", false);
        let mut follows = MockFollowRepository::new();
        follows
            .expect_exists()
            .returning(|_, _| Err(DomainError::DatabaseError("connection reset".into())));
        let access = AccessControl::new(store, Arc::new(follows));

        assert!(matches!(
            access.authorize(viewer, owner, Resource::Profile).await,
            Err(DomainError::DatabaseError(_))
        ));
    }
}
