//! Comment service
//!
//! Comments on posts, plus the lookups used after a comment reaction.

use forum_core::entities::{Comment, NewComment, ReactionCounters};
use forum_core::validation::{validate_text, TextKind};
use forum_core::{CommentId, DomainError, PostId, UserId};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on an existing post
    #[instrument(skip(self, message), fields(post_id = %post_id, author_id = %author_id))]
    pub async fn create(
        &self,
        post_id: PostId,
        author_id: UserId,
        message: &str,
    ) -> ServiceResult<Comment> {
        validate_text(message, TextKind::Comment)?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::UnknownUser(author_id)))?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                post_id,
                author_id,
                author: author.login,
                message: message.to_string(),
            })
            .await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    /// Comments of a post, oldest first
    pub async fn list(&self, post_id: PostId) -> ServiceResult<Vec<Comment>> {
        Ok(self.ctx.comment_repo().find_by_post(post_id).await?)
    }

    /// The post a comment belongs to
    pub async fn post_id_by_comment_id(&self, comment_id: CommentId) -> ServiceResult<PostId> {
        self.ctx
            .comment_repo()
            .post_id_by_comment_id(comment_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::CommentNotFound(comment_id)))
    }

    /// Like and dislike counters of every comment on a post
    pub async fn counters_by_post(
        &self,
        post_id: PostId,
    ) -> ServiceResult<Vec<(CommentId, ReactionCounters)>> {
        Ok(self.ctx.reaction_repo().comment_counters_by_post(post_id).await?)
    }
}
