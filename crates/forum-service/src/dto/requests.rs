//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. The attributes
//! only bound payload sizes; content rules live in `forum_core::validation`.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(max = 64, message = "Login must be at most 64 characters"))]
    pub login: String,

    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 64, message = "Login must be at most 64 characters"))]
    pub login: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    #[validate(length(max = 20000, message = "Message must be at most 20000 characters"))]
    pub message: String,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 categories"))]
    pub categories: Vec<String>,
}

/// Query parameters of the post listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    pub category: Option<String>,
    /// `my_posts` or `my_liked_posts`
    pub filter: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(max = 5000, message = "Comment must be at most 5000 characters"))]
    pub message: String,
}
