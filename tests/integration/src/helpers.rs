//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests
//! that carry the session cookie.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use forum_api::{create_app, create_app_state, serve, AppState};
use forum_common::AppConfig;
use forum_db::memory::MemoryStore;
use forum_service::ServiceContextBuilder;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
///
/// Dropping the server triggers its graceful shutdown.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Backing store when started with [`TestServer::start`]
    pub store: Option<MemoryStore>,
    cookie_name: String,
    shutdown: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory store
    pub async fn start() -> Result<Self> {
        let config = memory_config()?;
        let store = MemoryStore::new();
        let shared = Arc::new(store.clone());

        let ctx = ServiceContextBuilder::new()
            .user_repo(shared.clone())
            .session_repo(shared.clone())
            .post_repo(shared.clone())
            .comment_repo(shared.clone())
            .reaction_repo(shared)
            .session_config(config.session.clone())
            .build()?;

        Self::serve_state(AppState::new(ctx, config), Some(store)).await
    }

    /// Start a server against the PostgreSQL database named by `DATABASE_URL`
    pub async fn start_postgres() -> Result<Self> {
        let config = test_config()?;
        let state = create_app_state(config).await?;
        Self::serve_state(state, None).await
    }

    async fn serve_state(state: AppState, store: Option<MemoryStore>) -> Result<Self> {
        let cookie_name = state.service_context().session_config().cookie_name.clone();
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let (shutdown, stop) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _ = serve(listener, app, async move {
                let _ = stop.await;
            })
            .await;
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            cookie_name,
            shutdown: Some(shutdown),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn with_session(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header(header::COOKIE, format!("{}={token}", self.cookie_name))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with a session
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .with_session(self.client.get(self.url(path)), token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with a session
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .with_session(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodyless PUT request with a session
    pub async fn put_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .with_session(self.client.put(self.url(path)), token)
            .send()
            .await?)
    }

    /// Session token carried by a response's `Set-Cookie`
    pub fn session_token(&self, response: &Response) -> Option<String> {
        let prefix = format!("{}=", self.cookie_name);
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find_map(|pair| pair.strip_prefix(prefix.as_str()))
            .map(ToString::to_string)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Configuration for in-memory servers; no environment needed
pub fn memory_config() -> Result<AppConfig> {
    AppConfig::from_lookup(|key| match key {
        "API_PORT" => Some("0".to_string()),
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "SESSION_COOKIE_SECURE" => Some("false".to_string()),
        _ => None,
    })
    .context("Config error")
}

/// Configuration from the environment, for PostgreSQL-backed servers
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    AppConfig::from_env().context("Config error")
}

/// Helper to check if a PostgreSQL test environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    if std::env::var("API_PORT").is_err() {
        eprintln!("Skipping test: API_PORT not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
