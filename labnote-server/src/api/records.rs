//! Per-user record endpoints: project, update log, wet/dry digests

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::payload::{optional_string, require_object, required_field};
use super::require_user;
use crate::{ApiError, ApiResult, AppState};
use labnote_common::{LabDigest, LabType, ProjectDescription, UpdateEntry};

/// Dashboard: everything shown for one lab member
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user_id: String,
    pub project_description: Option<ProjectDescription>,
    pub wet_updates: Value,
    pub dry_updates: Value,
}

#[derive(Debug, Serialize)]
pub struct UpdatesResponse {
    pub user_id: String,
    pub updates: Vec<UpdateEntry>,
}

/// Missing digests render as `{}`
fn digest_or_empty(digest: Option<LabDigest>) -> Value {
    digest.map(|d| json!(d)).unwrap_or_else(|| json!({}))
}

/// GET /users/:user_id/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<DashboardResponse>> {
    require_user(&state, &user_id).await?;

    let project_description = state.store.load_project(&user_id).await?;
    let wet = state.store.load_digest(&user_id, LabType::Wet).await?;
    let dry = state.store.load_digest(&user_id, LabType::Dry).await?;

    Ok(Json(DashboardResponse {
        user_id,
        project_description,
        wet_updates: digest_or_empty(wet),
        dry_updates: digest_or_empty(dry),
    }))
}

/// GET /users/:user_id/project
pub async fn get_project(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    require_user(&state, &user_id).await?;

    let project = state
        .store
        .load_project(&user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(json!({ "user_id": user_id, "project": project })))
}

/// POST /users/:user_id/project
///
/// Body: `{"Name": "...", "Description": "..."}`. Replaces any previous project.
pub async fn post_project(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    require_user(&state, &user_id).await?;
    let payload = require_object(body)?;

    let project = ProjectDescription {
        name: required_field(&payload, &["Name"])?,
        description: required_field(&payload, &["Description"])?,
    };

    state.store.save_project(&user_id, &project).await?;
    tracing::info!(user_id = %user_id, name = %project.name, "Saved project description");

    Ok((StatusCode::CREATED, Json(json!({ "status": "ok" }))))
}

/// GET /users/:user_id/updates
pub async fn get_updates(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UpdatesResponse>> {
    require_user(&state, &user_id).await?;
    let updates = state.store.load_updates(&user_id).await?;
    Ok(Json(UpdatesResponse { user_id, updates }))
}

/// POST /users/:user_id/updates
///
/// Body: `{"date": "...", "Description": "...", "project_id": "..."?}`.
/// `Data`/`Text_Update` (earlier request shape) and `text` are accepted as aliases.
pub async fn post_update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    require_user(&state, &user_id).await?;
    let payload = require_object(body)?;

    let entry = UpdateEntry {
        date: required_field(&payload, &["date", "Data"])?,
        description: required_field(&payload, &["Description", "Text_Update", "text"])?,
        project_id: optional_string(&payload, "project_id")?,
    };

    let count = state.store.append_update(&user_id, entry.clone()).await?;
    tracing::info!(user_id = %user_id, date = %entry.date, count, "Appended update");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "ok", "update": entry })),
    ))
}

async fn lab_digest(state: &AppState, user_id: String, lab: LabType) -> ApiResult<Json<Value>> {
    require_user(state, &user_id).await?;
    let digest = state.store.load_digest(&user_id, lab).await?;

    let mut body = serde_json::Map::new();
    body.insert("user_id".to_string(), Value::String(user_id));
    body.insert(format!("{}_update", lab), digest_or_empty(digest));
    Ok(Json(Value::Object(body)))
}

/// GET /users/:user_id/wet
pub async fn get_wet(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    lab_digest(&state, user_id, LabType::Wet).await
}

/// GET /users/:user_id/dry
pub async fn get_dry(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Value>> {
    lab_digest(&state, user_id, LabType::Dry).await
}

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/dashboard", get(get_dashboard))
        .route("/users/:user_id/project", get(get_project).post(post_project))
        .route("/users/:user_id/updates", get(get_updates).post(post_update))
        .route("/users/:user_id/wet", get(get_wet))
        .route("/users/:user_id/dry", get(get_dry))
}
