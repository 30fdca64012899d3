//! Reaction database models

use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub user_id: i64,
    pub target_kind: String,
    pub target_id: i64,
    pub polarity: String,
}

/// Counter columns of a post or comment
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CountersModel {
    pub likes: i64,
    pub dislikes: i64,
}

/// Counter columns keyed by comment id
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CommentCountersModel {
    pub id: i64,
    pub likes: i64,
    pub dislikes: i64,
}
