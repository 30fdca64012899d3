//! User entity <-> model mapper

use forum_core::entities::User;
use forum_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::new(
            UserId::new(model.id),
            model.username,
            model.email,
            model.password_hash,
        )
    }
}
