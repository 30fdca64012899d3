//! User handlers

use axum::{extract::State, Json};
use forum_service::{UserResponse, UserService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context())
        .get(auth.user_id)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
