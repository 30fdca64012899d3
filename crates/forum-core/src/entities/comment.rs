//! Comment entity - a reply attached to a post

use chrono::{DateTime, Utc};

use super::reaction::ReactionCounters;
use crate::value_objects::{CommentId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author: String,
    pub message: String,
    pub counters: ReactionCounters,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: PostId,
    pub author_id: UserId,
    pub author: String,
    pub message: String,
}

impl NewComment {
    pub fn into_comment(self, id: CommentId, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            author_id: self.author_id,
            author: self.author,
            message: self.message,
            counters: ReactionCounters::default(),
            created_at,
        }
    }
}
