pub mod assessment;
pub mod auth;
pub mod chat;
pub mod consultations;
pub mod discover;
pub mod feeds;
pub mod health;
pub mod likes;
pub mod moderation;
pub mod profile;

use kindred_shared::errors::{AppError, AppResult};
use kindred_shared::types::auth::AuthUser;

use crate::models::UserRecord;
use crate::store::Store;

/// Resolve the authenticated user's record. A valid token whose user no
/// longer resolves is treated as an authentication failure.
pub(crate) fn current_user(store: &dyn Store, auth: &AuthUser) -> AppResult<UserRecord> {
    store
        .user_by_id(auth.id)?
        .ok_or_else(|| AppError::unauthorized("user not found"))
}
