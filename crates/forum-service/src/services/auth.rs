//! Authentication service
//!
//! Handles signup, login, logout and resolving the identity behind a session token.

use forum_core::entities::{NewUser, Session, User};
use forum_core::validation::validate_signup;
use forum_core::DomainError;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and open a session for them
    #[instrument(skip(self, password), fields(login = %login, email = %email))]
    pub async fn signup(
        &self,
        login: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<(User, Session)> {
        validate_signup(login, email, password)?;

        let password_hash = self.ctx.credentials().hash(password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                login: login.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        let session = SessionService::new(self.ctx).create_or_refresh(user.id).await?;
        Ok((user, session))
    }

    /// Login with login name and password
    ///
    /// An unknown login and a wrong password fail identically.
    #[instrument(skip(self, password), fields(login = %login))]
    pub async fn login(&self, login: &str, password: &str) -> ServiceResult<(User, Session)> {
        let user = self
            .ctx
            .user_repo()
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::Domain(DomainError::UserNotFound)
            })?;

        if !self.ctx.credentials().verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::Domain(DomainError::UserNotFound));
        }

        let session = SessionService::new(self.ctx).create_or_refresh(user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");
        Ok((user, session))
    }

    /// Logout, removing the session behind the token
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        if SessionService::new(self.ctx).delete(token).await? {
            info!("User logged out");
            Ok(())
        } else {
            Err(ServiceError::Unauthenticated)
        }
    }

    /// Resolve the user behind a session token
    #[instrument(skip_all)]
    pub async fn resolve_identity(&self, token: &str) -> ServiceResult<User> {
        let user_id = SessionService::new(self.ctx).resolve(token).await?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::SessionNotFound))
    }
}
