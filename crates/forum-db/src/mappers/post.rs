//! Post and comment entity <-> model mappers

use forum_core::entities::{Comment, Post, ReactionCounters};
use forum_core::value_objects::{CommentId, PostId, UserId};

use crate::models::{CommentModel, PostModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::new(model.id),
            author_id: UserId::new(model.author_id),
            author: model.author,
            title: model.title,
            message: model.message,
            categories: model.categories,
            counters: ReactionCounters::new(model.likes, model.dislikes),
            created_at: model.created_at,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            post_id: PostId::new(model.post_id),
            author_id: UserId::new(model.author_id),
            author: model.author,
            message: model.message,
            counters: ReactionCounters::new(model.likes, model.dislikes),
            created_at: model.created_at,
        }
    }
}
