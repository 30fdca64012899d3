//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Session;
use forum_core::traits::{RepoResult, SessionRepository};
use forum_core::value_objects::UserId;

use crate::models::SessionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SessionRepository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the raw session row of a user, live or not
    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT user_id, token, created_at, expires_at
            FROM sessions
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Session::from))
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn upsert_for_user(&self, session: &Session) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO sessions (user_id, token, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET token = EXCLUDED.token,
                created_at = EXCLUDED.created_at,
                expires_at = EXCLUDED.expires_at
            ",
        )
        .bind(session.user_id.into_inner())
        .bind(&session.token)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn find_user_by_token(&self, token: &str) -> RepoResult<Option<UserId>> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT user_id
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserId::new))
    }

    #[instrument(skip_all)]
    async fn delete_by_token(&self, token: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions
            WHERE token = $1
            ",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, before: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions
            WHERE expires_at < $1
            ",
        )
        .bind(before)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSessionRepository>();
    }
}
