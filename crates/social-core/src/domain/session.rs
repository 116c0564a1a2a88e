// ============================================================================
// Social Core - Session Entity
// File: crates/social-core/src/domain/session.rs
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use social_shared::constants::DEFAULT_SESSION_LIFETIME_DAYS;
use social_shared::UserId;

/// A persisted login. `user_id` never changes; rotating means deleting the
/// session and creating a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self { token, user_id, created_at }
    }
}

/// Absolute session lifetime measured from `created_at`.
///
/// The cutoff is inclusive: a session created exactly `ttl` ago is expired.
/// Storage adapters express the same rule as `created_at > cutoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLifetime {
    ttl: Duration,
}

impl SessionLifetime {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Oldest `created_at` that is already expired at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.ttl
    }

    pub fn is_live(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at > self.cutoff(now)
    }
}

impl Default for SessionLifetime {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_SESSION_LIFETIME_DAYS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetime_is_thirty_days() {
        assert_eq!(SessionLifetime::default().ttl(), Duration::days(30));
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let lifetime = SessionLifetime::default();
        let now = Utc::now();
        let cutoff = now - Duration::days(30);

        assert!(!lifetime.is_live(cutoff, now), "exactly at cutoff is expired");
        assert!(lifetime.is_live(cutoff + Duration::seconds(1), now), "just under the age limit");
        assert!(!lifetime.is_live(cutoff - Duration::seconds(1), now), "just over the age limit");
    }

    #[test]
    fn test_fresh_session_is_live() {
        let lifetime = SessionLifetime::default();
        let now = Utc::now();
        assert!(lifetime.is_live(now, now));
    }
}
