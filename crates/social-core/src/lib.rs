//! # Social Core
//! 
//! Domain entities, repository traits, and services for the social network
//! backend: the session cache and manager, the access-control rule, and the
//! profile/post/comment services built on top of them.

pub mod clock;
pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
