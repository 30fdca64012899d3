//! # forum-service
//!
//! Application layer: sessions, the reaction engine, posts and comments,
//! plus the DTOs exchanged with the HTTP layer.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
