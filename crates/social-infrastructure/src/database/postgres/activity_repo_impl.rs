// ============================================================================
// Social Infrastructure - PostgreSQL Activity Repository
// File: crates/social-infrastructure/src/database/postgres/activity_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use social_core::domain::{Activity, ActivityKind};
use social_core::error::DomainError;
use social_core::repositories::ActivityRepository;
use social_shared::UserId;

use crate::database::error::storage_error;

pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    content: String,
    created_at: DateTime<Utc>,
    target_id: Option<UserId>,
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn record(
        &self,
        user_id: UserId,
        kind: ActivityKind,
        target_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_activity (user_id, type, content, target_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(kind.description())
        .bind(target_id)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("recording activity", e))?;

        Ok(())
    }

    async fn recent(&self, user_id: UserId, limit: i64) -> Result<Vec<Activity>, DomainError> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
            SELECT id, type, content, created_at, target_id
            FROM user_activity
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("listing activity", e))?;

        Ok(rows
            .into_iter()
            .map(|r| Activity {
                id: r.id,
                kind: r.kind,
                content: r.content,
                created_at: r.created_at,
                target_id: r.target_id,
            })
            .collect())
    }
}
