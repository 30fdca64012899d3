//! Typed identifiers
//!
//! Every table in the forum uses a database-assigned `BIGINT` key. The
//! wrappers below keep user, post, and comment keys from being mixed up
//! while staying a plain `i64` on the wire and in storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an identifier from a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw key
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw key
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse from a decimal string; only positive keys are valid
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                match s.parse::<i64>() {
                    Ok(id) if id > 0 => Ok(Self(id)),
                    _ => Err(IdParseError::InvalidFormat),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

entity_id!(
    /// Primary key of a registered user
    UserId
);

entity_id!(
    /// Primary key of a post
    PostId
);

entity_id!(
    /// Primary key of a comment
    CommentId
);
