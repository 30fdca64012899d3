//! Domain entities - core business objects

mod comment;
mod post;
mod reaction;
mod session;
mod user;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
pub use reaction::{Reaction, ReactionCounters};
pub use session::Session;
pub use user::{NewUser, User};
