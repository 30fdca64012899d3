//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Post row joined with its aggregated category tags
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub author: String,
    pub title: String,
    pub message: String,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub categories: Vec<String>,
}
