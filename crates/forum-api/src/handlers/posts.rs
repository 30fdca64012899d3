//! Post and comment handlers
//!
//! Endpoints for listing, creating, and reading posts and their comments.

use axum::{
    extract::{Query, State},
    Json,
};
use forum_core::PostId;
use forum_service::{
    ApiResponse, CommentResponse, CommentService, CreateCommentRequest, CreatePostRequest,
    ListPostsQuery, PostPageResponse, PostResponse, PostService,
};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List posts newest first
///
/// GET /posts?category={tag}
/// GET /posts?filter=my_posts|my_liked_posts
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PostResponse>>>> {
    let filter = PostService::resolve_filter(
        query.category.as_deref(),
        query.filter.as_deref(),
        viewer.user_id(),
    )?;

    let posts = PostService::new(state.service_context()).list(&filter).await?;
    Ok(Json(ApiResponse::new(
        posts.iter().map(PostResponse::from).collect(),
    )))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let post = PostService::new(state.service_context())
        .create(
            auth.user_id,
            &request.title,
            &request.message,
            request.categories,
        )
        .await?;
    Ok(Created(Json(PostResponse::from(post))))
}

/// Get a post with its comments and the viewer's reaction
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<PostPageResponse>> {
    let page = PostService::new(state.service_context())
        .page(post_id, viewer.user_id())
        .await?;
    Ok(Json(PostPageResponse::from(page)))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let comment = CommentService::new(state.service_context())
        .create(post_id, auth.user_id, &request.message)
        .await?;
    Ok(Created(Json(CommentResponse::from(&comment))))
}

/// Every category tag in use
///
/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<String>>>> {
    let categories = PostService::new(state.service_context()).categories().await?;
    Ok(Json(ApiResponse::new(categories)))
}
