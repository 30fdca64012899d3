//! Authentication handlers
//!
//! Endpoints for signup, login, and logout. The session token is carried by
//! a cookie; response bodies never contain it.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use forum_service::{AuthResponse, AuthService, LoginRequest, SignupRequest};

use crate::extractors::{SessionToken, ValidatedJson};
use crate::response::ApiResult;
use crate::session::{clear_session_cookie, cookie_headers, session_cookie};
use crate::state::AppState;

/// Register a new user and open their first session
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let ctx = state.service_context();
    let (user, session) = AuthService::new(ctx)
        .signup(&request.login, &request.email, &request.password)
        .await?;

    let cookie = session_cookie(ctx.session_config(), &session.token)?;
    Ok((
        StatusCode::CREATED,
        cookie_headers(cookie),
        Json(AuthResponse::new(&user, &session)),
    ))
}

/// Login with login name and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let ctx = state.service_context();
    let (user, session) = AuthService::new(ctx)
        .login(&request.login, &request.password)
        .await?;

    let cookie = session_cookie(ctx.session_config(), &session.token)?;
    Ok((cookie_headers(cookie), Json(AuthResponse::new(&user, &session))))
}

/// Logout, ending the caller's session
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
) -> ApiResult<impl IntoResponse> {
    let ctx = state.service_context();
    AuthService::new(ctx).logout(&token).await?;

    let cookie = clear_session_cookie(ctx.session_config())?;
    Ok((StatusCode::NO_CONTENT, cookie_headers(cookie)))
}
