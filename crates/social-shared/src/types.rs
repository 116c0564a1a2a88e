//! Common types

use serde::{Deserialize, Serialize};

/// Primary key of a row in `users`.
pub type UserId = i64;

pub type PostId = i64;

/// Path segment naming a user: a numeric id or `me` for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRef {
    Me,
    Id(UserId),
}

impl UserRef {
    pub fn parse(segment: &str) -> Option<Self> {
        if segment == "me" {
            return Some(UserRef::Me);
        }
        segment.parse::<UserId>().ok().map(UserRef::Id)
    }

    /// Resolve against the authenticated caller.
    pub fn resolve(self, current: UserId) -> UserId {
        match self {
            UserRef::Me => current,
            UserRef::Id(id) => id,
        }
    }
}
