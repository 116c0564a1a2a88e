//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use social_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use thiserror::Error;

/// Minimum zxcvbn score (0..=4) accepted at registration.
const MIN_STRENGTH_SCORE: u8 = 2;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Password too short")]
    TooShort,
    #[error("Password too long")]
    TooLong,
    #[error("Password too weak")]
    TooWeak,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Registration policy: length bounds, then a zxcvbn strength floor.
    /// `user_inputs` (username, email, ...) count against the score.
    pub fn check_strength(password: &str, user_inputs: &[&str]) -> Result<(), PasswordError> {
        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordError::TooLong);
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if u8::from(estimate.score()) < MIN_STRENGTH_SCORE {
            return Err(PasswordError::TooWeak);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("correct horse battery staple").unwrap();
        assert!(PasswordService::verify("correct horse battery staple", &hash).unwrap());
        assert!(!PasswordService::verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            PasswordService::verify("anything", "not-a-phc-string"),
            Err(PasswordError::HashError(_))
        ));
    }

    #[test]
    fn test_strength_policy() {
        assert!(matches!(
            PasswordService::check_strength("short", &[]),
            Err(PasswordError::TooShort)
        ));
        assert!(matches!(
            PasswordService::check_strength(&"x".repeat(129), &[]),
            Err(PasswordError::TooLong)
        ));
        assert!(matches!(
            PasswordService::check_strength("password", &[]),
            Err(PasswordError::TooWeak)
        ));
        assert!(PasswordService::check_strength("violet-Otter-harbor-91", &["alice"]).is_ok());
    }
}
