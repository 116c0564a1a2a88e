//! # Social Security
//! 
//! Security utilities: password hashing, password policy, session tokens.

pub mod password;
pub mod token;

pub use password::{PasswordError, PasswordService};
pub use token::{generate_session_token, TokenError};
