// ============================================================================
// Social Infrastructure - PostgreSQL Post Repository
// File: crates/social-infrastructure/src/database/postgres/post_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use social_core::domain::{NewPost, Post, UserPost};
use social_core::error::DomainError;
use social_core::repositories::PostRepository;
use social_shared::{PostId, UserId};

use crate::database::error::storage_error;

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: PostId,
    user_id: UserId,
    author: String,
    title: String,
    content: String,
    categories: String,
    creation_date: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: row.user_id,
            author: row.author,
            title: row.title,
            content: row.content,
            categories: row.categories,
            creation_date: row.creation_date,
        }
    }
}

#[derive(Debug, FromRow)]
struct UserPostRow {
    id: PostId,
    user_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
    username: String,
    likes: i64,
}

impl From<UserPostRow> for UserPost {
    fn from(row: UserPostRow) -> Self {
        UserPost {
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
            username: row.username,
            likes: row.likes,
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(
        &self,
        user_id: UserId,
        author: &str,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, DomainError> {
        sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, categories, user_id, author, creation_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.categories)
        .bind(user_id)
        .bind(author)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("creating post", e))
    }

    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, author, title, content, categories, creation_date
            FROM posts
            ORDER BY creation_date DESC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("listing posts", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<UserPost>, DomainError> {
        let rows: Vec<UserPostRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.user_id, p.content, p.creation_date AS created_at, u.username,
                   (SELECT COUNT(*) FROM post_likes WHERE post_id = p.id) AS likes
            FROM posts p
            JOIN users u ON p.user_id = u.id
            WHERE p.user_id = $1
            ORDER BY p.creation_date DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("listing user posts", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
