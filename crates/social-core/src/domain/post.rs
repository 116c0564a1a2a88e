//! Post entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_shared::{PostId, UserId};
use validator::Validate;

/// Feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub author: String,
    pub title: String,
    pub content: String,
    pub categories: String,
    pub creation_date: DateTime<Utc>,
}

/// Post as listed on a user's profile, with its like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPost {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub likes: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(length(min = 1, message = "Categories are required"))]
    pub categories: String,
}
