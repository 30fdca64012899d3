//! Session service
//!
//! Issues, resolves and removes cookie sessions. A user holds at most one
//! session; logging in again replaces its token in place.

use chrono::Utc;
use forum_common::generate_session_token;
use forum_core::entities::Session;
use forum_core::{DomainError, UserId};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a fresh token for the user, replacing any existing session
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn create_or_refresh(&self, user_id: UserId) -> ServiceResult<Session> {
        let token = generate_session_token()?;
        let session = Session::issue(user_id, token, Utc::now(), self.ctx.session_config().ttl());

        self.ctx.session_repo().upsert_for_user(&session).await?;

        info!(user_id = %user_id, expires_at = %session.expires_at, "Session issued");
        Ok(session)
    }

    /// Resolve a token to the user owning a live session
    ///
    /// Unknown and expired tokens fail the same way.
    #[instrument(skip_all)]
    pub async fn resolve(&self, token: &str) -> ServiceResult<UserId> {
        require_token(token)?;

        self.ctx
            .session_repo()
            .find_user_by_token(token)
            .await?
            .ok_or(ServiceError::Domain(DomainError::SessionNotFound))
    }

    /// Remove the session holding this token; returns whether one existed
    #[instrument(skip_all)]
    pub async fn delete(&self, token: &str) -> ServiceResult<bool> {
        require_token(token)?;

        let removed = self.ctx.session_repo().delete_by_token(token).await?;
        debug!(removed, "Session delete");
        Ok(removed)
    }

    /// Delete every session whose expiry has passed
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> ServiceResult<u64> {
        let removed = self.ctx.session_repo().delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Expired sessions swept");
        }
        Ok(removed)
    }
}

fn require_token(token: &str) -> ServiceResult<()> {
    if token.is_empty() {
        return Err(ServiceError::validation("session token must not be empty"));
    }
    Ok(())
}
