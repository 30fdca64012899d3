//! PostgreSQL implementation of ReactionRepository
//!
//! A unit of work wraps one transaction. `lock_target` takes a row lock on
//! the post or comment, so concurrent toggles on the same target serialize
//! until the holder commits or rolls back.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use forum_core::entities::{Reaction, ReactionCounters};
use forum_core::traits::{ReactionRepository, ReactionUnitOfWork, RepoResult};
use forum_core::value_objects::{
    CommentId, CounterDelta, Polarity, PostId, ReactionTarget, UserId,
};

use crate::mappers::{parse_polarity, target_table};
use crate::models::{CommentCountersModel, CountersModel, ReactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every reaction row on a target
    #[instrument(skip(self))]
    pub async fn rows_for_target(&self, target: ReactionTarget) -> RepoResult<Vec<Reaction>> {
        let rows = sqlx::query_as::<_, ReactionModel>(
            r"
            SELECT user_id, target_kind, target_id, polarity
            FROM reactions
            WHERE target_kind = $1 AND target_id = $2
            ORDER BY user_id
            ",
        )
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Reaction::try_from).collect()
    }
}

/// One reaction transaction
pub struct PgReactionUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ReactionUnitOfWork for PgReactionUnitOfWork {
    #[instrument(skip(self))]
    async fn lock_target(&mut self, target: ReactionTarget) -> RepoResult<bool> {
        let sql = format!(
            "SELECT id FROM {} WHERE id = $1 FOR UPDATE",
            target_table(target.kind)
        );
        let locked = sqlx::query_scalar::<_, i64>(&sql)
            .bind(target.id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(locked.is_some())
    }

    #[instrument(skip(self))]
    async fn find_polarity(
        &mut self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>> {
        let raw = sqlx::query_scalar::<_, String>(
            r"
            SELECT polarity
            FROM reactions
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        raw.as_deref().map(parse_polarity).transpose()
    }

    #[instrument(skip(self))]
    async fn insert(&mut self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reactions (user_id, target_kind, target_id, polarity)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(reaction.user_id.into_inner())
        .bind(reaction.target.kind.as_str())
        .bind(reaction.target.id)
        .bind(reaction.polarity.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&mut self, reaction: &Reaction) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM reactions
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3 AND polarity = $4
            ",
        )
        .bind(reaction.user_id.into_inner())
        .bind(reaction.target.kind.as_str())
        .bind(reaction.target.id)
        .bind(reaction.polarity.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn adjust_counters(
        &mut self,
        target: ReactionTarget,
        delta: CounterDelta,
    ) -> RepoResult<()> {
        let sql = format!(
            "UPDATE {} SET likes = likes + $2, dislikes = dislikes + $3 WHERE id = $1",
            target_table(target.kind)
        );
        sqlx::query(&sql)
            .bind(target.id)
            .bind(delta.likes)
            .bind(delta.dislikes)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    async fn begin(&self) -> RepoResult<Box<dyn ReactionUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgReactionUnitOfWork { tx }))
    }

    #[instrument(skip(self))]
    async fn find_polarity(
        &self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>> {
        let raw = sqlx::query_scalar::<_, String>(
            r"
            SELECT polarity
            FROM reactions
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_str())
        .bind(target.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        raw.as_deref().map(parse_polarity).transpose()
    }

    #[instrument(skip(self))]
    async fn counters(&self, target: ReactionTarget) -> RepoResult<Option<ReactionCounters>> {
        let sql = format!(
            "SELECT likes, dislikes FROM {} WHERE id = $1",
            target_table(target.kind)
        );
        let result = sqlx::query_as::<_, CountersModel>(&sql)
            .bind(target.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ReactionCounters::from))
    }

    #[instrument(skip(self))]
    async fn comment_counters_by_post(
        &self,
        post_id: PostId,
    ) -> RepoResult<Vec<(CommentId, ReactionCounters)>> {
        let rows = sqlx::query_as::<_, CommentCountersModel>(
            r"
            SELECT id, likes, dislikes
            FROM comments
            WHERE post_id = $1
            ORDER BY id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    CommentId::new(row.id),
                    ReactionCounters::new(row.likes, row.dislikes),
                )
            })
            .collect())
    }
}
