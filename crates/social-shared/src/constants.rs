//! Application-wide constants

/// Absolute session lifetime, counted from the persisted `created_at`.
pub const DEFAULT_SESSION_LIFETIME_DAYS: i64 = 30;
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session_token";
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_CACHE_WRITE_TIMEOUT_MS: u64 = 50;
pub const SESSION_TOKEN_BYTES: usize = 32;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_ACTIVITY_ENTRIES: i64 = 50;
