// ============================================================================
// Social Core - Session Manager
// File: crates/social-core/src/services/session_manager.rs
// ============================================================================
//! Session lifecycle: write-through creation, cached lookup with storage
//! fallback, deletion, and expiry sweeping.

use std::sync::Arc;
use std::time::Duration;
use social_shared::utils::mask_token;
use social_shared::UserId;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::{Session, SessionLifetime};
use crate::error::DomainError;
use crate::repositories::SessionRepository;
use super::session_cache::{CachedSession, SessionCache};

/// Attempts at drawing a fresh token when the store reports a collision.
const MAX_TOKEN_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub lifetime: SessionLifetime,
    /// Longest wait for the cache write lock when populating on a miss.
    pub cache_write_timeout: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            lifetime: SessionLifetime::default(),
            cache_write_timeout: Duration::from_millis(
                social_shared::constants::DEFAULT_CACHE_WRITE_TIMEOUT_MS,
            ),
        }
    }
}

/// Owns the session cache and the durable session store behind it.
///
/// The store is the source of truth; the cache only saves a round-trip.
pub struct SessionManager {
    store: Arc<dyn SessionRepository>,
    cache: SessionCache,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionRepository>, policy: SessionPolicy) -> Self {
        Self {
            store,
            cache: SessionCache::new(),
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn lifetime(&self) -> SessionLifetime {
        self.policy.lifetime
    }

    /// Persist a new session, then cache it. Nothing is cached on failure.
    pub async fn create_session(&self, user_id: UserId) -> Result<String, DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let token = social_security::generate_session_token()?;
            let session = Session::new(token, user_id, self.clock.now());

            match self.store.insert(&session).await {
                Ok(()) => {
                    self.cache.insert(
                        session.token.clone(),
                        CachedSession {
                            user_id,
                            created_at: session.created_at,
                        },
                    );
                    info!("Session created for user {}", user_id);
                    return Ok(session.token);
                }
                Err(DomainError::SessionTokenConflict) if attempt < MAX_TOKEN_ATTEMPTS => {
                    warn!("Session token collision for user {}, regenerating", user_id);
                }
                Err(e) => {
                    error!("Failed to persist session for user {}: {}", user_id, e);
                    return Err(e);
                }
            }
        }
    }

    /// Identity behind `token`. `Ok(None)` covers absent, expired and never
    /// issued tokens alike.
    pub async fn resolve(&self, token: &str) -> Result<Option<UserId>, DomainError> {
        let now = self.clock.now();

        if let Some(cached) = self.cache.get(token) {
            if self.policy.lifetime.is_live(cached.created_at, now) {
                debug!("Session cache hit for {}", mask_token(token));
                return Ok(Some(cached.user_id));
            }
            // Aged out while cached; the stored row has the same created_at.
            self.cache.remove(token);
            debug!("Cached session {} expired", mask_token(token));
            return Ok(None);
        }

        debug!("Session cache miss for {}", mask_token(token));
        // Read before storage so a delete racing this lookup blocks population
        let generation = self.cache.generation();
        let cutoff = self.policy.lifetime.cutoff(now);
        let Some(session) = self.store.find_active(token, cutoff).await? else {
            return Ok(None);
        };

        self.cache.try_insert(
            session.token,
            CachedSession {
                user_id: session.user_id,
                created_at: session.created_at,
            },
            self.policy.cache_write_timeout,
            generation,
        );
        Ok(Some(session.user_id))
    }

    /// Evicts from the cache first so a failed storage delete still denies
    /// the token on the fast path, and again once storage has answered so a
    /// lookup that read the row in between cannot leave it cached.
    pub async fn delete_session(&self, token: &str) -> Result<(), DomainError> {
        self.cache.remove(token);
        let deleted = self.store.delete_by_token(token).await;
        self.cache.remove(token);

        deleted.map_err(|e| {
            error!("Failed to delete session {}: {}", mask_token(token), e);
            e
        })?;

        info!("Session {} deleted", mask_token(token));
        Ok(())
    }

    /// Physically removes expired rows and cache entries.
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        let cutoff = self.policy.lifetime.cutoff(self.clock.now());
        let evicted = self.cache.evict_created_before(cutoff);
        let deleted = self.store.delete_expired(cutoff).await?;

        if deleted > 0 || evicted > 0 {
            info!("Purged {} expired sessions ({} cached)", deleted, evicted);
        }
        Ok(deleted)
    }
}

/// Runs [`SessionManager::purge_expired`] every `every`. Errors are logged
/// and the loop keeps going; abort the handle to stop it.
pub fn spawn_expiry_sweeper(manager: Arc<SessionManager>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!("Session expiry sweeper started (every {:?})", every);

        loop {
            ticker.tick().await;
            if let Err(e) = manager.purge_expired().await {
                error!("Session sweep failed: {}", e);
            }
        }
    })
}
