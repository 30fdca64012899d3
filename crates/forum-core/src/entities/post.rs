//! Post entity - a discussion thread

use chrono::{DateTime, Utc};

use super::reaction::ReactionCounters;
use crate::value_objects::{PostId, UserId};

/// Post with its author login and category tags resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    /// Author login at the time of posting
    pub author: String,
    pub title: String,
    pub message: String,
    pub categories: Vec<String>,
    pub counters: ReactionCounters,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Check whether the post is tagged with a category
    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }
}

/// Data for a new post; categories are deduplicated in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: UserId,
    pub author: String,
    pub title: String,
    pub message: String,
    pub categories: Vec<String>,
}

impl NewPost {
    pub fn new(
        author_id: UserId,
        author: String,
        title: String,
        message: String,
        categories: Vec<String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(categories.len());
        for tag in categories {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        Self {
            author_id,
            author,
            title,
            message,
            categories: unique,
        }
    }

    /// Attach the key and timestamp assigned by storage
    pub fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            author_id: self.author_id,
            author: self.author,
            title: self.title,
            message: self.message,
            categories: self.categories,
            counters: ReactionCounters::default(),
            created_at,
        }
    }
}
