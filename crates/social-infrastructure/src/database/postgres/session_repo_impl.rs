// ============================================================================
// Social Infrastructure - PostgreSQL Session Repository
// File: crates/social-infrastructure/src/database/postgres/session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use social_core::domain::Session;
use social_core::error::DomainError;
use social_core::repositories::SessionRepository;
use social_shared::UserId;

use crate::database::error::{storage_error, unique_violation};

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SessionRow {
    token: String,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            token: row.token,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(&session.token)
            .bind(session.user_id)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                if unique_violation(&e).is_some() {
                    DomainError::SessionTokenConflict
                } else {
                    storage_error("inserting session", e)
                }
            })?;

        Ok(())
    }

    async fn find_active(&self, token: &str, not_before: DateTime<Utc>) -> Result<Option<Session>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT token, user_id, created_at
            FROM sessions
            WHERE token = $1 AND created_at > $2
            "#
        )
        .bind(token)
        .bind(not_before)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("finding session", e))?;

        Ok(row.map(Into::into))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("deleting session", e))?;

        Ok(())
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE created_at <= $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("purging sessions", e))?;

        if result.rows_affected() > 0 {
            info!("Deleted {} expired sessions", result.rows_affected());
        }
        Ok(result.rows_affected())
    }
}
