//! Session entity <-> model mapper

use forum_core::entities::Session;
use forum_core::value_objects::UserId;

use crate::models::SessionModel;

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            user_id: UserId::new(model.user_id),
            token: model.token,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}
