//! In-memory session cache
//!
//! Accelerator in front of the session table. Never authoritative: clearing
//! it only costs a storage round-trip on the next lookup of each token.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use social_shared::UserId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Cached copy of a persisted session row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedSession {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Token -> session map behind a read/write lock.
///
/// Every method holds the lock only for the map access itself.
///
/// `removals` is bumped under the write lock by every removal, so a lookup
/// that read storage before a logout can tell that its row may be stale.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: RwLock<HashMap<String, CachedSession>>,
    removals: AtomicU64,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &str) -> Option<CachedSession> {
        self.entries.read().get(token).copied()
    }

    pub fn insert(&self, token: String, session: CachedSession) {
        self.entries.write().insert(token, session);
    }

    /// Current removal generation; pass it to [`SessionCache::try_insert`].
    pub fn generation(&self) -> u64 {
        self.removals.load(Ordering::Acquire)
    }

    /// Insert unless the write lock cannot be taken within `timeout`, or any
    /// removal happened since `generation` was read. Returns whether the
    /// entry was stored.
    pub fn try_insert(
        &self,
        token: String,
        session: CachedSession,
        timeout: Duration,
        generation: u64,
    ) -> bool {
        let Some(mut entries) = self.entries.try_write_for(timeout) else {
            debug!("Session cache write lock busy, skipping population");
            return false;
        };
        if self.removals.load(Ordering::Acquire) != generation {
            debug!("Session removed during lookup, skipping population");
            return false;
        }
        entries.insert(token, session);
        true
    }

    /// Idempotent. Bumps the removal generation even when the token was not
    /// cached.
    pub fn remove(&self, token: &str) -> Option<CachedSession> {
        let mut entries = self.entries.write();
        self.removals.fetch_add(1, Ordering::AcqRel);
        entries.remove(token)
    }

    /// Drops entries with `created_at <= cutoff`. Returns how many.
    pub fn evict_created_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write();
        self.removals.fetch_add(1, Ordering::AcqRel);
        let before = entries.len();
        entries.retain(|_, session| session.created_at > cutoff);
        before - entries.len()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        self.removals.fetch_add(1, Ordering::AcqRel);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
