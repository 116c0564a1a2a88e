//! # Social Infrastructure
//! 
//! PostgreSQL implementations (adapters) of the social-core repository traits.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgActivityRepository, PgCommentRepository, PgFollowRepository,
    PgPostRepository, PgSessionRepository, PgUserRepository,
};
