//! Authentication extractors
//!
//! Read the session cookie and resolve it to a user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{headers::Cookie, TypedHeader};
use forum_core::UserId;
use forum_service::SessionService;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw session token taken from the cookie, not yet resolved
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl SessionToken {
    async fn from_parts<S>(parts: &mut Parts, state: &S) -> Option<Self>
    where
        S: Send + Sync,
        AppState: FromRef<S>,
    {
        let app_state = AppState::from_ref(state);
        let cookie_name = &app_state.service_context().session_config().cookie_name;

        let TypedHeader(cookies) = TypedHeader::<Cookie>::from_request_parts(parts, state)
            .await
            .ok()?;
        cookies
            .get(cookie_name)
            .filter(|token| !token.is_empty())
            .map(|token| SessionToken(token.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts, state).await.ok_or(ApiError::MissingAuth)
    }
}

/// Authenticated user resolved from a live session
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let user_id = SessionService::new(app_state.service_context())
            .resolve(&token)
            .await?;

        Ok(AuthUser::new(user_id))
    }
}

/// Optional authenticated user
///
/// Missing, unknown and expired cookies all yield `None`; storage
/// failures are still errors.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.as_ref().map(|auth| auth.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(SessionToken(token)) = SessionToken::from_parts(parts, state).await else {
            return Ok(OptionalAuthUser(None));
        };

        let app_state = AppState::from_ref(state);
        match SessionService::new(app_state.service_context())
            .resolve(&token)
            .await
        {
            Ok(user_id) => Ok(OptionalAuthUser(Some(AuthUser::new(user_id)))),
            Err(e) if e.is_unauthenticated() => Ok(OptionalAuthUser(None)),
            Err(e) => Err(e.into()),
        }
    }
}
