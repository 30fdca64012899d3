//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub login: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            login: format!("tester{suffix}"),
            email: format!("tester{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            login: signup.login.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub expires_at: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
    pub email: String,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub message: String,
    pub categories: Vec<String>,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test post {suffix}"),
            message: "Body of the test post".to_string(),
            categories: Vec::new(),
        }
    }

    pub fn in_category(tag: &str) -> Self {
        Self {
            categories: vec![tag.to_string()],
            ..Self::unique()
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub author_id: i64,
    pub author: String,
    pub title: String,
    pub message: String,
    pub categories: Vec<String>,
    pub likes: i64,
    pub dislikes: i64,
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub message: String,
}

impl CreateCommentRequest {
    pub fn simple(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub message: String,
    pub likes: i64,
    pub dislikes: i64,
}

/// Post page response
#[derive(Debug, Deserialize)]
pub struct PostPageResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    pub viewer_reaction: String,
}

/// Reaction toggle response
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub target_kind: String,
    pub target_id: i64,
    pub post_id: i64,
    pub state: String,
    pub likes: i64,
    pub dislikes: i64,
}

/// List wrapper
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
