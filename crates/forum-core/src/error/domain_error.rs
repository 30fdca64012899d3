//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{CommentId, PostId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authentication Errors
    // =========================================================================
    /// Unknown login or wrong password; the two are never told apart
    #[error("Incorrect login or password")]
    UserNotFound,

    /// Session token unknown or expired
    #[error("Session not found")]
    SessionNotFound,

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username")]
    InvalidUserName,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid typing post")]
    InvalidPost,

    #[error("Invalid typing comment")]
    InvalidComment,

    #[error("Invalid typing category")]
    InvalidCategory,

    #[error("Empty value")]
    EmptyValue,

    #[error("Invalid query request: {0}")]
    InvalidQueryRequest(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Login already in use")]
    LoginAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Authentication
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SessionNotFound => "UNAUTHENTICATED",

            // Not Found
            Self::UnknownUser(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUserName => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidPost => "INVALID_POST",
            Self::InvalidComment => "INVALID_COMMENT",
            Self::InvalidCategory => "INVALID_CATEGORY",
            Self::EmptyValue => "EMPTY_VALUE",
            Self::InvalidQueryRequest(_) => "INVALID_QUERY_REQUEST",

            // Conflict
            Self::LoginAlreadyExists => "LOGIN_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is an authentication failure
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::SessionNotFound)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownUser(_) | Self::PostNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUserName
                | Self::InvalidEmail
                | Self::InvalidPassword
                | Self::InvalidPost
                | Self::InvalidComment
                | Self::InvalidCategory
                | Self::EmptyValue
                | Self::InvalidQueryRequest(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::LoginAlreadyExists | Self::EmailAlreadyExists)
    }

    /// Check if this is a storage failure
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UnknownUser(UserId::new(1)).code(), "UNKNOWN_USER");
        assert_eq!(DomainError::SessionNotFound.code(), "UNAUTHENTICATED");
        assert_eq!(DomainError::EmptyValue.code(), "EMPTY_VALUE");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::PostNotFound(PostId::new(1)).is_not_found());
        assert!(DomainError::CommentNotFound(CommentId::new(1)).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_unauthenticated_cases_share_classification() {
        assert!(DomainError::UserNotFound.is_unauthenticated());
        assert!(DomainError::SessionNotFound.is_unauthenticated());
        assert!(!DomainError::UserNotFound.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::InvalidUserName.is_validation());
        assert!(DomainError::ValidationError("empty token".to_string()).is_validation());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::UserNotFound.to_string(), "Incorrect login or password");
        assert_eq!(DomainError::InvalidComment.to_string(), "Invalid typing comment");
        assert_eq!(
            DomainError::PostNotFound(PostId::new(7)).to_string(),
            "Post not found: 7"
        );
    }
}
