//! Session entity - an authenticated login bound to one user

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::UserId;

/// Active login. At most one exists per user; a new login replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    /// Opaque random token carried by the client
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a session starting at `now` that lives for `ttl`
    pub fn issue(user_id: UserId, token: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            token,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// A session is valid strictly before its expiry instant
    #[inline]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
