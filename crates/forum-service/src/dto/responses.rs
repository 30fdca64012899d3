//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use forum_core::{ReactionState, TargetKind};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Current authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
    pub email: String,
}

/// Signup and login response; the session itself travels in a cookie
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub author_id: i64,
    pub author: String,
    pub title: String,
    pub message: String,
    pub categories: Vec<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub author: String,
    pub message: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
}

/// A post with its comments, as seen by the viewer
#[derive(Debug, Clone, Serialize)]
pub struct PostPageResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    pub viewer_reaction: ReactionState,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a like/dislike toggle
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub target_kind: TargetKind,
    pub target_id: i64,
    /// Post that owns the target; equals `target_id` for posts
    pub post_id: i64,
    pub state: ReactionState,
    pub likes: i64,
    pub dislikes: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
