//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Comment, NewComment, NewPost, NewUser, Post, Reaction, ReactionCounters, Session, User,
};
use crate::error::DomainError;
use crate::value_objects::{CommentId, CounterDelta, Polarity, PostId, ReactionTarget, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by login, including the password hash
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// Insert a new user.
    ///
    /// Fails with `LoginAlreadyExists` or `EmailAlreadyExists` on a duplicate.
    async fn create(&self, user: &NewUser) -> RepoResult<User>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert the session, or overwrite the user's existing one, in a single write
    async fn upsert_for_user(&self, session: &Session) -> RepoResult<()>;

    /// Resolve a token to its owner; expired sessions resolve to `None`
    async fn find_user_by_token(&self, token: &str) -> RepoResult<Option<UserId>>;

    /// Remove a session by token, returning whether a row was removed
    async fn delete_by_token(&self, token: &str) -> RepoResult<bool>;

    /// Remove every session that expired before `before`
    async fn delete_expired(&self, before: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Selection applied when listing posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    ByCategory(String),
    MyPosts(UserId),
    MyLikedPosts(UserId),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID with its categories
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List posts matching a filter, newest first
    async fn list(&self, filter: &PostFilter) -> RepoResult<Vec<Post>>;

    /// Create a post together with its category tags
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Distinct category tags in use, sorted
    async fn categories(&self) -> RepoResult<Vec<String>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// List comments of a post, oldest first
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;

    /// Create a comment; fails with `PostNotFound` when the post is missing
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Get the post a comment belongs to
    async fn post_id_by_comment_id(&self, id: CommentId) -> RepoResult<Option<PostId>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

/// One atomic reaction update.
///
/// Dropping the unit without calling [`commit`](ReactionUnitOfWork::commit)
/// discards every write made through it.
#[async_trait]
pub trait ReactionUnitOfWork: Send {
    /// Lock the target row for the rest of the unit; `false` if it does not exist
    async fn lock_target(&mut self, target: ReactionTarget) -> RepoResult<bool>;

    /// Polarity the user currently holds on the target
    async fn find_polarity(
        &mut self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>>;

    /// Insert a reaction row
    async fn insert(&mut self, reaction: &Reaction) -> RepoResult<()>;

    /// Delete a reaction row of exactly this polarity, returning rows removed
    async fn delete(&mut self, reaction: &Reaction) -> RepoResult<u64>;

    /// Add a delta to the target's like/dislike counters
    async fn adjust_counters(&mut self, target: ReactionTarget, delta: CounterDelta)
        -> RepoResult<()>;

    /// Make every write visible atomically
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Start a unit of work
    async fn begin(&self) -> RepoResult<Box<dyn ReactionUnitOfWork>>;

    /// Polarity the user currently holds on the target, outside any unit
    async fn find_polarity(
        &self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>>;

    /// Current counters of a target
    async fn counters(&self, target: ReactionTarget) -> RepoResult<Option<ReactionCounters>>;

    /// Counters of every comment on a post, keyed by comment
    async fn comment_counters_by_post(
        &self,
        post_id: PostId,
    ) -> RepoResult<Vec<(CommentId, ReactionCounters)>>;
}
