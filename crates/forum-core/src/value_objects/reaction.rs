//! Reaction value objects and the like/dislike toggle state machine
//!
//! A user holds at most one reaction per target. Applying a polarity moves
//! the `(user, target)` pair between three states:
//!
//! | current  | desired | remove   | insert   | next     | deltas                |
//! |----------|---------|----------|----------|----------|-----------------------|
//! | None     | Like    |          | like     | Liked    | likes +1              |
//! | Liked    | Like    | like     |          | None     | likes -1              |
//! | Disliked | Like    | dislike  | like     | Liked    | dislikes -1, likes +1 |
//!
//! Dislike is the mirror image. The planner is pure; storage adapters apply
//! the resulting [`Transition`] inside one unit of work.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::{CommentId, PostId};

/// Kind of content a reaction is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(Self::Post),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Like or dislike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Like,
    Dislike,
}

impl Polarity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post or a comment, addressed by kind and raw key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReactionTarget {
    pub kind: TargetKind,
    pub id: i64,
}

impl ReactionTarget {
    pub const fn post(id: PostId) -> Self {
        Self {
            kind: TargetKind::Post,
            id: id.into_inner(),
        }
    }

    pub const fn comment(id: CommentId) -> Self {
        Self {
            kind: TargetKind::Comment,
            id: id.into_inner(),
        }
    }
}

impl fmt::Display for ReactionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Reaction held by one user on one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    pub const fn polarity(self) -> Option<Polarity> {
        match self {
            Self::None => None,
            Self::Liked => Some(Polarity::Like),
            Self::Disliked => Some(Polarity::Dislike),
        }
    }

    /// Plan the writes needed to apply `desired` from this state
    pub fn apply(self, desired: Polarity) -> Transition {
        match self.polarity() {
            // Same polarity again toggles it off
            Some(current) if current == desired => Transition {
                remove: Some(current),
                insert: None,
                next: Self::None,
                delta: CounterDelta::ZERO.with(current, -1),
            },
            Some(current) => Transition {
                remove: Some(current),
                insert: Some(desired),
                next: desired.into(),
                delta: CounterDelta::ZERO.with(current, -1).with(desired, 1),
            },
            None => Transition {
                remove: None,
                insert: Some(desired),
                next: desired.into(),
                delta: CounterDelta::ZERO.with(desired, 1),
            },
        }
    }
}

impl From<Polarity> for ReactionState {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Like => Self::Liked,
            Polarity::Dislike => Self::Disliked,
        }
    }
}

impl From<Option<Polarity>> for ReactionState {
    fn from(polarity: Option<Polarity>) -> Self {
        polarity.map_or(Self::None, Self::from)
    }
}

/// Signed change to a target's denormalized counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    pub const ZERO: Self = Self {
        likes: 0,
        dislikes: 0,
    };

    #[must_use]
    pub const fn with(mut self, polarity: Polarity, amount: i64) -> Self {
        match polarity {
            Polarity::Like => self.likes += amount,
            Polarity::Dislike => self.dislikes += amount,
        }
        self
    }
}

/// Writes required to move between reaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Row to delete first, if any
    pub remove: Option<Polarity>,
    /// Row to insert afterwards, if any
    pub insert: Option<Polarity>,
    pub next: ReactionState,
    pub delta: CounterDelta,
}
