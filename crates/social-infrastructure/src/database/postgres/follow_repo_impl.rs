// ============================================================================
// Social Infrastructure - PostgreSQL Follow Repository
// File: crates/social-infrastructure/src/database/postgres/follow_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use social_core::domain::{FollowEdge, UserSummary};
use social_core::error::DomainError;
use social_core::repositories::FollowRepository;
use social_shared::UserId;

use crate::database::error::storage_error;

pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    id: UserId,
    username: String,
    first_name: String,
    last_name: String,
}

impl From<SummaryRow> for UserSummary {
    fn from(row: SummaryRow) -> Self {
        UserSummary {
            id: row.id,
            username: row.username,
            firstname: row.first_name,
            lastname: row.last_name,
        }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn exists(&self, follower_id: UserId, following_id: UserId) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM followers WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("checking follow edge", e))
    }

    async fn insert(&self, edge: &FollowEdge) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO followers (follower_id, following_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, following_id) DO NOTHING
            "#
        )
        .bind(edge.follower_id)
        .bind(edge.following_id)
        .bind(edge.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("inserting follow edge", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, follower_id: UserId, following_id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM followers WHERE follower_id = $1 AND following_id = $2")
            .bind(follower_id)
            .bind(following_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("deleting follow edge", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn followers_of(&self, user_id: UserId) -> Result<Vec<UserSummary>, DomainError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.first_name, u.last_name
            FROM users u
            JOIN followers f ON u.id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY f.created_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("listing followers", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn following_of(&self, user_id: UserId) -> Result<Vec<UserSummary>, DomainError> {
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.first_name, u.last_name
            FROM users u
            JOIN followers f ON u.id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("listing following", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
