//! Entity to model mappers
//!
//! This module provides conversions between domain entities (forum-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - helpers mapping reaction enums to their stored text

mod post;
mod reaction;
mod session;
mod user;

pub use reaction::{parse_polarity, target_table};
