//! Reaction handlers
//!
//! Like/dislike toggles for posts and comments. Each request flips the
//! caller's reaction and answers with the new state and counters.

use axum::{extract::State, Json};
use forum_core::{CommentId, Polarity, PostId, ReactionTarget, UserId};
use forum_service::{CommentService, ReactionResponse, ReactionService};

use crate::extractors::{AuthUser, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

async fn react_to_post(
    state: &AppState,
    user_id: UserId,
    post_id: PostId,
    polarity: Polarity,
) -> ApiResult<Json<ReactionResponse>> {
    let target = ReactionTarget::post(post_id);
    let outcome = ReactionService::new(state.service_context())
        .toggle(target, user_id, polarity)
        .await?;
    Ok(Json(ReactionResponse::new(target, post_id, outcome)))
}

async fn react_to_comment(
    state: &AppState,
    user_id: UserId,
    comment_id: CommentId,
    polarity: Polarity,
) -> ApiResult<Json<ReactionResponse>> {
    let ctx = state.service_context();
    let target = ReactionTarget::comment(comment_id);
    let outcome = ReactionService::new(ctx)
        .toggle(target, user_id, polarity)
        .await?;
    let post_id = CommentService::new(ctx)
        .post_id_by_comment_id(comment_id)
        .await?;
    Ok(Json(ReactionResponse::new(target, post_id, outcome)))
}

/// Like a post, or take the like back
///
/// PUT /posts/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<ReactionResponse>> {
    react_to_post(&state, auth.user_id, post_id, Polarity::Like).await
}

/// Dislike a post, or take the dislike back
///
/// PUT /posts/{post_id}/dislike
pub async fn dislike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<ReactionResponse>> {
    react_to_post(&state, auth.user_id, post_id, Polarity::Dislike).await
}

/// PUT /comments/{comment_id}/like
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<ReactionResponse>> {
    react_to_comment(&state, auth.user_id, comment_id, Polarity::Like).await
}

/// PUT /comments/{comment_id}/dislike
pub async fn dislike_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<ReactionResponse>> {
    react_to_comment(&state, auth.user_id, comment_id, Polarity::Dislike).await
}
