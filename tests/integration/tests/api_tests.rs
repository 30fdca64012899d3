//! API Integration Tests
//!
//! Most tests run against an in-process server backed by the in-memory
//! store. The PostgreSQL smoke test additionally needs `DATABASE_URL` and
//! `API_PORT`.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Sign up a fresh user and return the request and their session token
async fn signed_up(server: &TestServer) -> (SignupRequest, String) {
    let request = SignupRequest::unique();
    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    let token = server.session_token(&response).expect("signup sets the session cookie");
    assert_status(response, StatusCode::CREATED).await.unwrap();
    (request, token)
}

async fn create_post(server: &TestServer, token: &str, request: &CreatePostRequest) -> PostResponse {
    let response = server.post_auth("/api/v1/posts", token, request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn react(server: &TestServer, path: &str, token: &str) -> ReactionResponse {
    let response = server.put_auth(path, token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_logs_the_user_in() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (request, token) = signed_up(&server).await;

    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.login, request.login);
    assert_eq!(user.email, request.email);
}

#[tokio::test]
async fn test_signup_duplicate_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (first, _) = signed_up(&server).await;

    let mut second = SignupRequest::unique();
    second.login = first.login.clone();
    let response = server.post("/api/v1/auth/signup", &second).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "LOGIN_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_replaces_previous_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (signup, first_token) = signed_up(&server).await;

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let second_token = server.session_token(&response).expect("login sets the session cookie");
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.login, signup.login);
    assert_ne!(first_token, second_token);

    // One live session per user
    let response = server.get_auth("/api/v1/users/@me", &first_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    let response = server.get_auth("/api/v1/users/@me", &second_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (signup, _) = signed_up(&server).await;

    let wrong_password = LoginRequest {
        login: signup.login.clone(),
        password: "WrongPass123".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &wrong_password).await.unwrap();
    assert!(server.session_token(&response).is_none());
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        login: "nobody".to_string(),
        password: "TestPass123".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signed_up(&server).await;

    let response = server.post_auth("/api/v1/auth/logout", &token, &()).await.unwrap();
    assert_eq!(server.session_token(&response).as_deref(), Some(""));
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // No session left to end
    let response = server.post_auth("/api/v1/auth/logout", &token, &()).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.post("/api/v1/auth/logout", &()).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_filter_posts() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (alice, alice_token) = signed_up(&server).await;
    let (_, bob_token) = signed_up(&server).await;

    let rust_post = create_post(&server, &alice_token, &CreatePostRequest::in_category("rust")).await;
    assert_eq!(rust_post.author, alice.login);
    assert_eq!(rust_post.categories, vec!["rust"]);
    let bob_post = create_post(&server, &bob_token, &CreatePostRequest::in_category("go")).await;

    let response = server.get("/api/v1/posts").await.unwrap();
    let all: DataResponse<Vec<PostResponse>> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<i64> = all.data.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![bob_post.id, rust_post.id]);

    let response = server.get("/api/v1/posts?category=rust").await.unwrap();
    let rust: DataResponse<Vec<PostResponse>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rust.data.len(), 1);
    assert_eq!(rust.data[0].id, rust_post.id);

    let response = server
        .get_auth("/api/v1/posts?filter=my_posts", &bob_token)
        .await
        .unwrap();
    let mine: DataResponse<Vec<PostResponse>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.data.len(), 1);
    assert_eq!(mine.data[0].id, bob_post.id);

    react(&server, &format!("/api/v1/posts/{}/like", rust_post.id), &bob_token).await;
    let response = server
        .get_auth("/api/v1/posts?filter=my_liked_posts", &bob_token)
        .await
        .unwrap();
    let liked: DataResponse<Vec<PostResponse>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.data.len(), 1);
    assert_eq!(liked.data[0].id, rust_post.id);

    let response = server.get("/api/v1/categories").await.unwrap();
    let categories: DataResponse<Vec<String>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(categories.data, vec!["go", "rust"]);
}

#[tokio::test]
async fn test_post_requires_session_and_valid_text() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/api/v1/posts", &CreatePostRequest::unique()).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let (_, token) = signed_up(&server).await;
    let blank = CreatePostRequest {
        title: "   ".to_string(),
        ..CreatePostRequest::unique()
    };
    let response = server.post_auth("/api/v1/posts", &token, &blank).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_post_like_dislike_sequence() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signed_up(&server).await;
    let post = create_post(&server, &token, &CreatePostRequest::unique()).await;
    let like = format!("/api/v1/posts/{}/like", post.id);
    let dislike = format!("/api/v1/posts/{}/dislike", post.id);

    let outcome = react(&server, &like, &token).await;
    assert_eq!((outcome.state.as_str(), outcome.likes, outcome.dislikes), ("liked", 1, 0));

    let outcome = react(&server, &dislike, &token).await;
    assert_eq!((outcome.state.as_str(), outcome.likes, outcome.dislikes), ("disliked", 0, 1));

    let outcome = react(&server, &dislike, &token).await;
    assert_eq!((outcome.state.as_str(), outcome.likes, outcome.dislikes), ("none", 0, 0));
    assert_eq!(outcome.target_kind, "post");
    assert_eq!(outcome.post_id, post.id);
}

#[tokio::test]
async fn test_reaction_on_missing_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signed_up(&server).await;

    let response = server.put_auth("/api/v1/posts/424242/like", &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comment_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice_token) = signed_up(&server).await;
    let (bob, bob_token) = signed_up(&server).await;
    let post = create_post(&server, &alice_token, &CreatePostRequest::unique()).await;

    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/comments", post.id),
            &bob_token,
            &CreateCommentRequest::simple("Nice post"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.author, bob.login);

    let outcome = react(
        &server,
        &format!("/api/v1/comments/{}/like", comment.id),
        &alice_token,
    )
    .await;
    assert_eq!(outcome.target_kind, "comment");
    assert_eq!(outcome.target_id, comment.id);
    assert_eq!(outcome.post_id, post.id);
    assert_eq!(outcome.likes, 1);

    react(&server, &format!("/api/v1/posts/{}/dislike", post.id), &bob_token).await;

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &bob_token)
        .await
        .unwrap();
    let page: PostPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.post.dislikes, 1);
    assert_eq!(page.viewer_reaction, "disliked");
    assert_eq!(page.comments.len(), 1);
    assert_eq!(page.comments[0].likes, 1);

    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let anonymous: PostPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous.viewer_reaction, "none");
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = signed_up(&server).await;

    let response = server
        .post_auth(
            "/api/v1/posts/424242/comments",
            &token,
            &CreateCommentRequest::simple("Hello?"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_likes_are_all_counted() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author_token) = signed_up(&server).await;
    let post = create_post(&server, &author_token, &CreatePostRequest::unique()).await;

    let mut tokens = Vec::new();
    for _ in 0..8 {
        tokens.push(signed_up(&server).await.1);
    }

    let path = format!("/api/v1/posts/{}/like", post.id);
    let responses = join_all(tokens.iter().map(|token| server.put_auth(&path, token))).await;
    for response in responses {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let page: PostPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.post.likes, 8);
    assert_eq!(page.post.dislikes, 0);
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
async fn test_postgres_backed_smoke() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start_postgres().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let (_, token) = signed_up(&server).await;
    let post = create_post(&server, &token, &CreatePostRequest::in_category("smoke")).await;
    let outcome = react(&server, &format!("/api/v1/posts/{}/like", post.id), &token).await;
    assert_eq!(outcome.likes, 1);
}
