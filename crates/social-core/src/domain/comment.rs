//! Comment entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use social_shared::PostId;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub creation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    #[validate(range(min = 1, message = "Post id must be positive"))]
    pub post_id: PostId,

    #[validate(length(min = 1, message = "Comment must not be empty"))]
    pub content: String,
}
