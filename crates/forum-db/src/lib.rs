//! # forum-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `forum-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! With the `memory` feature it also ships [`memory::MemoryStore`], an
//! in-process implementation of the same traits for tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use forum_db::repositories::PgSessionRepository;
//! use forum_core::traits::SessionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let sessions = PgSessionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgPostRepository, PgReactionRepository, PgSessionRepository,
    PgUserRepository,
};
