//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! validation, session lifecycle and the reaction engine.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod reaction;
pub mod session;
pub mod sweeper;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::{PostPage, PostService};
pub use reaction::{ReactionOutcome, ReactionService};
pub use session::SessionService;
pub use sweeper::SessionSweeper;
pub use user::UserService;
