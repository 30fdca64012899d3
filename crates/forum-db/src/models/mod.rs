//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod post;
mod reaction;
mod session;
mod user;

pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::{CommentCountersModel, CountersModel, ReactionModel};
pub use session::SessionModel;
pub use user::UserModel;
