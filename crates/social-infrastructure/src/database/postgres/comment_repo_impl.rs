// ============================================================================
// Social Infrastructure - PostgreSQL Comment Repository
// File: crates/social-infrastructure/src/database/postgres/comment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use social_core::domain::{Comment, NewComment};
use social_core::error::DomainError;
use social_core::repositories::CommentRepository;
use social_shared::PostId;

use crate::database::error::storage_error;

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    post_id: PostId,
    author: String,
    content: String,
    creation_date: DateTime<Utc>,
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: &NewComment, author: &str, created_at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO comments (post_id, author, content, creation_date) VALUES ($1, $2, $3, $4)",
        )
        .bind(comment.post_id)
        .bind(author)
        .bind(&comment.content)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            let missing_post = e
                .as_database_error()
                .map(|db| db.is_foreign_key_violation())
                .unwrap_or(false);
            if missing_post {
                DomainError::PostNotFound
            } else {
                storage_error("creating comment", e)
            }
        })?;

        Ok(())
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, DomainError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT post_id, author, content, creation_date
            FROM comments
            WHERE post_id = $1
            ORDER BY creation_date DESC
            "#
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("listing comments", e))?;

        Ok(rows
            .into_iter()
            .map(|r| Comment {
                post_id: r.post_id,
                author: r.author,
                content: r.content,
                creation_date: r.creation_date,
            })
            .collect())
    }
}
