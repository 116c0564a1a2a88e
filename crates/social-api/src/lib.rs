//! # Social API
//! 
//! HTTP handlers, session cookie extraction, and the axum router.

pub mod cookies;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{build_router, cors_layer};
pub use state::AppState;
