//! # forum-api
//!
//! REST API server built with Axum framework. Sessions travel in an
//! `HttpOnly` cookie; see [`session`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

pub use server::{create_app, create_app_state, run, serve, shutdown_signal};
pub use state::AppState;
