//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{NewPost, Post};
use forum_core::traits::{PostFilter, PostRepository, RepoResult};
use forum_core::value_objects::PostId;

use crate::models::PostModel;

use super::error::map_db_error;

/// Post columns with categories folded into an array
const SELECT_POSTS: &str = r"
    SELECT p.id, p.author_id, p.author, p.title, p.message, p.likes, p.dislikes, p.created_at,
           COALESCE(
               ARRAY_AGG(c.tag ORDER BY c.tag) FILTER (WHERE c.tag IS NOT NULL),
               '{}'
           ) AS categories
    FROM posts p
    LEFT JOIN categories c ON c.post_id = p.id
";

const GROUP_AND_ORDER: &str = r"
    GROUP BY p.id
    ORDER BY p.created_at DESC, p.id DESC
";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// WHERE clause for a filter; `$1` is the filter argument when present
fn filter_clause(filter: &PostFilter) -> &'static str {
    match filter {
        PostFilter::All => "",
        PostFilter::ByCategory(_) => {
            "WHERE EXISTS (SELECT 1 FROM categories f WHERE f.post_id = p.id AND f.tag = $1)"
        }
        PostFilter::MyPosts(_) => "WHERE p.author_id = $1",
        PostFilter::MyLikedPosts(_) => {
            "WHERE EXISTS (SELECT 1 FROM reactions r WHERE r.target_kind = 'post' \
             AND r.target_id = p.id AND r.user_id = $1 AND r.polarity = 'like')"
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let sql = format!("{SELECT_POSTS} WHERE p.id = $1 {GROUP_AND_ORDER}");
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &PostFilter) -> RepoResult<Vec<Post>> {
        let sql = format!("{SELECT_POSTS} {} {GROUP_AND_ORDER}", filter_clause(filter));
        let query = sqlx::query_as::<_, PostModel>(&sql);
        let query = match filter {
            PostFilter::All => query,
            PostFilter::ByCategory(tag) => query.bind(tag),
            PostFilter::MyPosts(user_id) | PostFilter::MyLikedPosts(user_id) => {
                query.bind(user_id.into_inner())
            }
        };

        let rows = query.fetch_all(&self.pool).await.map_err(map_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let (id, created_at) = sqlx::query_as::<_, (i64, chrono::DateTime<chrono::Utc>)>(
            r"
            INSERT INTO posts (author_id, author, title, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            ",
        )
        .bind(post.author_id.into_inner())
        .bind(&post.author)
        .bind(&post.title)
        .bind(&post.message)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for tag in &post.categories {
            sqlx::query(
                r"
                INSERT INTO categories (post_id, tag)
                VALUES ($1, $2)
                ON CONFLICT (post_id, tag) DO NOTHING
                ",
            )
            .bind(id)
            .bind(tag)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        let mut created = post.clone().into_post(PostId::new(id), created_at);
        created.categories.sort();
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT tag
            FROM categories
            ORDER BY tag
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
