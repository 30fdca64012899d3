//! Reaction entity <-> model mapper

use forum_core::entities::{Reaction, ReactionCounters};
use forum_core::error::DomainError;
use forum_core::value_objects::{Polarity, ReactionTarget, TargetKind, UserId};

use crate::models::{CountersModel, ReactionModel};

/// Table holding the counters of a target kind
pub fn target_table(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Post => "posts",
        TargetKind::Comment => "comments",
    }
}

/// Decode a stored polarity value
pub fn parse_polarity(raw: &str) -> Result<Polarity, DomainError> {
    Polarity::parse(raw)
        .ok_or_else(|| DomainError::DatabaseError(format!("unknown polarity '{raw}'")))
}

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind = TargetKind::parse(&model.target_kind).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown target kind '{}'", model.target_kind))
        })?;
        Ok(Reaction::new(
            UserId::new(model.user_id),
            ReactionTarget {
                kind,
                id: model.target_id,
            },
            parse_polarity(&model.polarity)?,
        ))
    }
}

impl From<CountersModel> for ReactionCounters {
    fn from(model: CountersModel) -> Self {
        ReactionCounters::new(model.likes, model.dislikes)
    }
}
