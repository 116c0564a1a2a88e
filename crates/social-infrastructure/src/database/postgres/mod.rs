//! PostgreSQL repository implementations

pub mod session_repo_impl;
pub mod user_repo_impl;
pub mod follow_repo_impl;
pub mod post_repo_impl;
pub mod comment_repo_impl;
pub mod activity_repo_impl;

pub use session_repo_impl::PgSessionRepository;
pub use user_repo_impl::PgUserRepository;
pub use follow_repo_impl::PgFollowRepository;
pub use post_repo_impl::PgPostRepository;
pub use comment_repo_impl::PgCommentRepository;
pub use activity_repo_impl::PgActivityRepository;
