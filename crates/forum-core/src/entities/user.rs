//! User entity - a registered forum account

use crate::value_objects::UserId;

/// Registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Create a User from stored fields
    pub fn new(id: UserId, login: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            login,
            email,
            password_hash,
        }
    }
}

/// Signup data ready for insertion; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Attach the key assigned by storage
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.login, self.email, self.password_hash)
    }
}
