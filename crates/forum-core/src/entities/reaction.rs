//! Reaction entity - one user's like or dislike on a post or comment

use serde::Serialize;

use crate::value_objects::{CounterDelta, Polarity, ReactionTarget, UserId};

/// A stored reaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: UserId,
    pub target: ReactionTarget,
    pub polarity: Polarity,
}

impl Reaction {
    pub fn new(user_id: UserId, target: ReactionTarget, polarity: Polarity) -> Self {
        Self {
            user_id,
            target,
            polarity,
        }
    }
}

/// Denormalized like/dislike totals carried by a post or comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReactionCounters {
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionCounters {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Counters after applying a delta
    #[must_use]
    pub fn applied(self, delta: CounterDelta) -> Self {
        Self {
            likes: self.likes + delta.likes,
            dislikes: self.dislikes + delta.dislikes,
        }
    }
}
