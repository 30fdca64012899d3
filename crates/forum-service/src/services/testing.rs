//! Helpers shared by service tests

use std::sync::Arc;

use forum_common::SessionConfig;
use forum_core::entities::{Post, User};
use forum_db::memory::MemoryStore;

use super::context::{ServiceContext, ServiceContextBuilder};
use super::post::PostService;
use super::AuthService;

/// Context over a fresh in-memory store
pub fn memory_context() -> (ServiceContext, MemoryStore) {
    memory_context_with(SessionConfig::default())
}

pub fn memory_context_with(config: SessionConfig) -> (ServiceContext, MemoryStore) {
    let store = MemoryStore::new();
    let shared = Arc::new(store.clone());
    let ctx = ServiceContextBuilder::new()
        .user_repo(shared.clone())
        .session_repo(shared.clone())
        .post_repo(shared.clone())
        .comment_repo(shared.clone())
        .reaction_repo(shared)
        .session_config(config)
        .build()
        .expect("all repositories provided");
    (ctx, store)
}

/// Sign up a user with a valid password
pub async fn signup(ctx: &ServiceContext, login: &str) -> User {
    AuthService::new(ctx)
        .signup(login, &format!("{login}@example.com"), "Secret123")
        .await
        .expect("signup succeeds")
        .0
}

pub async fn post_by(ctx: &ServiceContext, author: &User, categories: &[&str]) -> Post {
    PostService::new(ctx)
        .create(
            author.id,
            "Hello forum",
            "First message",
            categories.iter().map(ToString::to_string).collect(),
        )
        .await
        .expect("post is valid")
}
