//! HTTP API handlers for labnote-server

pub mod health;
pub mod payload;
pub mod records;
pub mod users;

pub use health::health_routes;
pub use records::record_routes;
pub use users::user_routes;

use crate::{ApiError, ApiResult, AppState};
use labnote_common::UserProfile;

/// Look up a registered user or answer 404
pub(crate) async fn require_user(state: &AppState, user_id: &str) -> ApiResult<UserProfile> {
    state
        .lab
        .get_user(user_id)
        .await
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}
