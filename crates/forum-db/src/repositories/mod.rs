//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod post;
mod reaction;
mod session;
mod user;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use reaction::{PgReactionRepository, PgReactionUnitOfWork};
pub use session::PgSessionRepository;
pub use user::PgUserRepository;
