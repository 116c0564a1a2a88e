//! Activity repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use social_shared::UserId;
use crate::domain::{Activity, ActivityKind};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(
        &self,
        user_id: UserId,
        kind: ActivityKind,
        target_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Most recent entries first.
    async fn recent(&self, user_id: UserId, limit: i64) -> Result<Vec<Activity>, DomainError>;
}
