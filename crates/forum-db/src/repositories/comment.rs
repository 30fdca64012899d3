//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{Comment, NewComment};
use forum_core::traits::{CommentRepository, RepoResult};
use forum_core::value_objects::{CommentId, PostId};

use crate::models::CommentModel;

use super::error::{map_db_error, map_post_reference};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, author, message, likes, dislikes, created_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, author_id, author, message, likes, dislikes, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(post_id = %comment.post_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let (id, created_at) = sqlx::query_as::<_, (i64, chrono::DateTime<chrono::Utc>)>(
            r"
            INSERT INTO comments (post_id, author_id, author, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            ",
        )
        .bind(comment.post_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(&comment.author)
        .bind(&comment.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_post_reference(e, comment.post_id))?;

        Ok(comment.clone().into_comment(CommentId::new(id), created_at))
    }

    #[instrument(skip(self))]
    async fn post_id_by_comment_id(&self, id: CommentId) -> RepoResult<Option<PostId>> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT post_id
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PostId::new))
    }
}
