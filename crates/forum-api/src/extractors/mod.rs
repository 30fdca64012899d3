//! Axum extractors for request handling
//!
//! Custom extractors for session authentication, validation, and path IDs.

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser, SessionToken};
pub use path::IdPath;
pub use validated::ValidatedJson;
