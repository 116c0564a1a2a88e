//! Repository traits (ports)

pub mod session_repository;
pub mod user_repository;
pub mod follow_repository;
pub mod post_repository;
pub mod comment_repository;
pub mod activity_repository;

pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
pub use follow_repository::FollowRepository;
pub use post_repository::PostRepository;
pub use comment_repository::CommentRepository;
pub use activity_repository::ActivityRepository;
