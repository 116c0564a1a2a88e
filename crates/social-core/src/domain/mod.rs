//! # Social Core - Domain Module
//! 
//! Domain entities for the social network backend.

pub mod session;
pub mod user;
pub mod follow;
pub mod post;
pub mod comment;
pub mod activity;

// Re-export all entities and enums
pub use session::{Session, SessionLifetime};
pub use user::{LimitedUser, NewUser, User, UserCredentials, UserSummary};
pub use follow::FollowEdge;
pub use post::{NewPost, Post, UserPost};
pub use comment::{Comment, NewComment};
pub use activity::{Activity, ActivityKind};
