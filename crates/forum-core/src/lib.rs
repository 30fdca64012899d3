//! # forum-core
//!
//! Domain layer containing entities, value objects, validation rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, NewComment, NewPost, NewUser, Post, Reaction, ReactionCounters, Session, User,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, PostFilter, PostRepository, ReactionRepository, ReactionUnitOfWork,
    RepoResult, SessionRepository, UserRepository,
};
pub use validation::TextKind;
pub use value_objects::{
    CommentId, CounterDelta, IdParseError, Polarity, PostId, ReactionState, ReactionTarget,
    TargetKind, Transition, UserId,
};
