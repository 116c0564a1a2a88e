//! Mapping of sqlx errors onto domain errors

use social_core::error::DomainError;
use tracing::error;

/// Log and wrap a storage failure.
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, err);
    DomainError::DatabaseError(err.to_string())
}

/// Name of the violated unique constraint, if `err` is a unique violation.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    let db_err = err.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    Some(db_err.constraint().unwrap_or_default().to_string())
}
