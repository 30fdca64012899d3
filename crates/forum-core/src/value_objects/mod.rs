//! Value objects - immutable types that represent domain concepts

mod id;
mod reaction;

pub use id::{CommentId, IdParseError, PostId, UserId};
pub use reaction::{CounterDelta, Polarity, ReactionState, ReactionTarget, TargetKind, Transition};
