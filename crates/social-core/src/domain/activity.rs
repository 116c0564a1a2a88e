//! User activity history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_shared::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Follow,
    Unfollow,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Follow => "follow",
            ActivityKind::Unfollow => "unfollow",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityKind::Follow => "started following a user",
            ActivityKind::Unfollow => "unfollowed a user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<UserId>,
}
