//! User registry endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::payload::{optional_string, require_object, required_with_message};
use crate::{ApiResult, AppState};
use labnote_common::UserProfile;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserProfile>,
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Json<UserListResponse> {
    Json(UserListResponse {
        users: state.lab.list_users().await,
    })
}

/// POST /users
///
/// Body: `{"user_id": "...", "name": "...", "role": "...", "email": "..."?}`
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let payload = require_object(body)?;

    let user_id = required_with_message(&payload, "user_id", "user_id is required")?;
    let name = required_with_message(&payload, "name", "name is required")?;
    let role = required_with_message(&payload, "role", "role is required")?;
    let email = optional_string(&payload, "email")?;

    let profile = state
        .lab
        .create_user(UserProfile {
            user_id,
            name,
            role,
            email,
        })
        .await?;

    tracing::info!(user_id = %profile.user_id, role = %profile.role, "Created user");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "ok", "user_id": profile.user_id })),
    ))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}
