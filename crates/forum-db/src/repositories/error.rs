//! Error handling utilities for repositories

use forum_core::error::DomainError;
use forum_core::value_objects::PostId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback.
///
/// `on_unique` receives the name of the violated constraint, if reported.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Map a duplicate login or email on signup
pub fn user_conflict(constraint: Option<&str>) -> DomainError {
    match constraint {
        Some("users_email_key") => DomainError::EmailAlreadyExists,
        _ => DomainError::LoginAlreadyExists,
    }
}

/// Map a foreign key failure on a row referencing a post
pub fn map_post_reference(e: SqlxError, post_id: PostId) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return DomainError::PostNotFound(post_id);
        }
    }
    DomainError::DatabaseError(e.to_string())
}
