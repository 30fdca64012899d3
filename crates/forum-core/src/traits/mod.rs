//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    CommentRepository, PostFilter, PostRepository, ReactionRepository, ReactionUnitOfWork,
    RepoResult, SessionRepository, UserRepository,
};
