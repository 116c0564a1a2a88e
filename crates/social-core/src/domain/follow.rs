//! Follow relationship

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_shared::UserId;

use crate::error::DomainError;

/// Directed edge: `follower_id` follows `following_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl FollowEdge {
    pub fn new(follower_id: UserId, following_id: UserId, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        if follower_id == following_id {
            return Err(DomainError::CannotFollowSelf);
        }
        Ok(Self { follower_id, following_id, created_at })
    }
}
