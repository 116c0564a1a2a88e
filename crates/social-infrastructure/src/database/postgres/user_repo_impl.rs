// ============================================================================
// Social Infrastructure - PostgreSQL User Repository
// File: crates/social-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use social_core::domain::{NewUser, User, UserCredentials};
use social_core::error::DomainError;
use social_core::repositories::UserRepository;
use social_shared::UserId;

use crate::database::error::{storage_error, unique_violation};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub bio: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            bio: row.bio,
            is_private: row.is_private,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT 
                id, username, email, first_name, last_name,
                date_of_birth, bio, is_private, created_at
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("finding user by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row: Option<(UserId, String)> = sqlx::query_as("SELECT id, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("finding credentials", e))?;

        Ok(row.map(|(user_id, password_hash)| UserCredentials { user_id, password_hash }))
    }

    async fn find_privacy(&self, id: UserId) -> Result<Option<bool>, DomainError> {
        sqlx::query_scalar("SELECT is_private FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("reading privacy flag", e))
    }

    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("checking user existence", e))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> Result<UserId, DomainError> {
        info!("Creating user: {}", user.username);

        let id: UserId = sqlx::query_scalar(
            r#"
            INSERT INTO users (
                username, email, password, first_name, last_name, date_of_birth, bio
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.date_of_birth)
        .bind(&user.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| match unique_violation(&e) {
            Some(constraint) if constraint.contains("email") => {
                DomainError::EmailAlreadyExists(user.email.clone())
            }
            Some(_) => DomainError::UsernameAlreadyExists(user.username.clone()),
            None => storage_error("creating user", e),
        })?;

        info!("User created successfully: {}", id);
        Ok(id)
    }

    async fn update_privacy(&self, id: UserId, is_private: bool) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET is_private = $1 WHERE id = $2")
            .bind(is_private)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("updating privacy", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }
}
