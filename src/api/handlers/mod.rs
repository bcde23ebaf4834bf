// Request handlers (HTTP adapters)

pub mod auth;
pub mod expenses;
pub mod reports;

use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::user::User;

/// Resolves an authenticated user id to the full user record
pub(crate) async fn current_user(state: &AppState, user_id: Uuid) -> Result<User, ApiError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))
}
