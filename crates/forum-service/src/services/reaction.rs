//! Reaction service
//!
//! Like/dislike toggling on posts and comments. Each call runs in one unit of
//! work: lock the target, read the caller's reaction, plan the transition,
//! write rows and counters, commit. An error anywhere drops the unit and
//! nothing is applied.

use forum_core::entities::{Reaction, ReactionCounters};
use forum_core::{
    CommentId, DomainError, Polarity, PostId, ReactionState, ReactionTarget, TargetKind, UserId,
};
use serde::Serialize;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// State of a target after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionOutcome {
    /// The caller's reaction after the toggle
    pub state: ReactionState,
    pub counters: ReactionCounters,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn apply_like(
        &self,
        target: ReactionTarget,
        user_id: UserId,
    ) -> ServiceResult<ReactionOutcome> {
        self.toggle(target, user_id, Polarity::Like).await
    }

    pub async fn apply_dislike(
        &self,
        target: ReactionTarget,
        user_id: UserId,
    ) -> ServiceResult<ReactionOutcome> {
        self.toggle(target, user_id, Polarity::Dislike).await
    }

    /// Apply `desired` for the user: set it, flip to it, or toggle it off
    #[instrument(skip(self), fields(target = %target, user_id = %user_id, polarity = %desired))]
    pub async fn toggle(
        &self,
        target: ReactionTarget,
        user_id: UserId,
        desired: Polarity,
    ) -> ServiceResult<ReactionOutcome> {
        let mut unit = self.ctx.reaction_repo().begin().await?;

        if !unit.lock_target(target).await? {
            return Err(missing_target(target).into());
        }

        let current = ReactionState::from(unit.find_polarity(user_id, target).await?);
        let transition = current.apply(desired);

        if let Some(polarity) = transition.remove {
            unit.delete(&Reaction::new(user_id, target, polarity)).await?;
        }
        if let Some(polarity) = transition.insert {
            unit.insert(&Reaction::new(user_id, target, polarity)).await?;
        }
        unit.adjust_counters(target, transition.delta).await?;
        unit.commit().await?;

        info!(
            target = %target,
            user_id = %user_id,
            from = ?current,
            to = ?transition.next,
            "Reaction toggled"
        );

        Ok(ReactionOutcome {
            state: transition.next,
            counters: self.counters(target).await?,
        })
    }

    /// The user's current reaction on a target
    pub async fn reaction_of(
        &self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> ServiceResult<ReactionState> {
        let polarity = self.ctx.reaction_repo().find_polarity(user_id, target).await?;
        Ok(ReactionState::from(polarity))
    }

    /// Like and dislike counters of a target
    pub async fn counters(&self, target: ReactionTarget) -> ServiceResult<ReactionCounters> {
        self.ctx
            .reaction_repo()
            .counters(target)
            .await?
            .ok_or_else(|| missing_target(target).into())
    }
}

fn missing_target(target: ReactionTarget) -> DomainError {
    match target.kind {
        TargetKind::Post => DomainError::PostNotFound(PostId::new(target.id)),
        TargetKind::Comment => DomainError::CommentNotFound(CommentId::new(target.id)),
    }
}
