//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::entities::{Comment, Post, Session, User};
use forum_core::{PostId, ReactionTarget};

use super::responses::{
    AuthResponse, CommentResponse, PostPageResponse, PostResponse, ReactionResponse, UserResponse,
};
use crate::services::{PostPage, ReactionOutcome};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            login: user.login.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl AuthResponse {
    pub fn new(user: &User, session: &Session) -> Self {
        Self {
            user: UserResponse::from(user),
            expires_at: session.expires_at,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.into_inner(),
            author_id: post.author_id.into_inner(),
            author: post.author.clone(),
            title: post.title.clone(),
            message: post.message.clone(),
            categories: post.categories.clone(),
            likes: post.counters.likes,
            dislikes: post.counters.dislikes,
            created_at: post.created_at,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self::from(&post)
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            post_id: comment.post_id.into_inner(),
            author_id: comment.author_id.into_inner(),
            author: comment.author.clone(),
            message: comment.message.clone(),
            likes: comment.counters.likes,
            dislikes: comment.counters.dislikes,
            created_at: comment.created_at,
        }
    }
}

impl From<PostPage> for PostPageResponse {
    fn from(page: PostPage) -> Self {
        Self {
            post: PostResponse::from(&page.post),
            comments: page.comments.iter().map(CommentResponse::from).collect(),
            viewer_reaction: page.viewer_reaction,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl ReactionResponse {
    pub fn new(target: ReactionTarget, post_id: PostId, outcome: ReactionOutcome) -> Self {
        Self {
            target_kind: target.kind,
            target_id: target.id,
            post_id: post_id.into_inner(),
            state: outcome.state,
            likes: outcome.counters.likes,
            dislikes: outcome.counters.dislikes,
        }
    }
}
