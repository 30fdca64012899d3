//! Post service
//!
//! Creating, listing and viewing posts.

use forum_core::entities::{Comment, NewPost, Post};
use forum_core::traits::PostFilter;
use forum_core::validation::{validate_text, TextKind};
use forum_core::{DomainError, PostId, ReactionState, ReactionTarget, UserId};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reaction::ReactionService;

/// Everything shown on a single post page
#[derive(Debug, Clone)]
pub struct PostPage {
    pub post: Post,
    /// Comments oldest first, each carrying its own counters
    pub comments: Vec<Comment>,
    /// The viewer's reaction on the post; `None` for anonymous viewers
    pub viewer_reaction: ReactionState,
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by `author_id`
    #[instrument(skip(self, title, message), fields(author_id = %author_id))]
    pub async fn create(
        &self,
        author_id: UserId,
        title: &str,
        message: &str,
        categories: Vec<String>,
    ) -> ServiceResult<Post> {
        validate_text(title, TextKind::Post)?;
        validate_text(message, TextKind::Post)?;
        for tag in &categories {
            validate_text(tag, TextKind::Category)?;
        }

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::UnknownUser(author_id)))?;

        let post = self
            .ctx
            .post_repo()
            .create(&NewPost::new(
                author.id,
                author.login,
                title.to_string(),
                message.to_string(),
                categories,
            ))
            .await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// List posts newest first
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &PostFilter) -> ServiceResult<Vec<Post>> {
        Ok(self.ctx.post_repo().list(filter).await?)
    }

    /// Build a listing filter from query parameters
    ///
    /// `filter` accepts `my_posts` and `my_liked_posts`, both of which need a viewer.
    pub fn resolve_filter(
        category: Option<&str>,
        filter: Option<&str>,
        viewer: Option<UserId>,
    ) -> ServiceResult<PostFilter> {
        match (category, filter) {
            (Some(_), Some(_)) => Err(DomainError::InvalidQueryRequest(
                "category and filter are mutually exclusive".to_string(),
            )
            .into()),
            (Some(tag), None) => Ok(PostFilter::ByCategory(tag.to_string())),
            (None, None) => Ok(PostFilter::All),
            (None, Some("my_posts")) => Ok(PostFilter::MyPosts(
                viewer.ok_or(ServiceError::Unauthenticated)?,
            )),
            (None, Some("my_liked_posts")) => Ok(PostFilter::MyLikedPosts(
                viewer.ok_or(ServiceError::Unauthenticated)?,
            )),
            (None, Some(other)) => Err(DomainError::InvalidQueryRequest(format!(
                "unknown filter '{other}'"
            ))
            .into()),
        }
    }

    /// Fetch a post
    pub async fn get(&self, post_id: PostId) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(post_id)))
    }

    /// Fetch a post with its comments and the viewer's reaction
    #[instrument(skip(self))]
    pub async fn page(&self, post_id: PostId, viewer: Option<UserId>) -> ServiceResult<PostPage> {
        let post = self.get(post_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        let viewer_reaction = match viewer {
            Some(user_id) => {
                ReactionService::new(self.ctx)
                    .reaction_of(user_id, ReactionTarget::post(post_id))
                    .await?
            }
            None => ReactionState::None,
        };

        Ok(PostPage {
            post,
            comments,
            viewer_reaction,
        })
    }

    /// Every category tag in use, sorted
    pub async fn categories(&self) -> ServiceResult<Vec<String>> {
        Ok(self.ctx.post_repo().categories().await?)
    }
}
