//! Session token generation

use rand::rngs::OsRng;
use rand::TryRngCore;
use social_shared::constants::SESSION_TOKEN_BYTES;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Opaque session token: 32 bytes from the OS CSPRNG, hex encoded.
pub fn generate_session_token() -> Result<String, TokenError> {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::EntropyUnavailable(e.to_string()))?;
    Ok(hex::encode(bytes))
}
