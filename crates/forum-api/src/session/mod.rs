//! Session cookie transport
//!
//! The session token travels in an `HttpOnly` cookie; these helpers build the
//! `Set-Cookie` values that issue and clear it.

use axum::http::{HeaderMap, HeaderValue, header::SET_COOKIE};
use forum_common::SessionConfig;

use crate::response::ApiError;

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(config: &SessionConfig, token: &str) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name, config.ttl_seconds
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(ApiError::internal)
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn clear_session_cookie(config: &SessionConfig) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(ApiError::internal)
}

/// Response headers holding a single `Set-Cookie`
pub fn cookie_headers(cookie: HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers
}
