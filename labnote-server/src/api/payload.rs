//! Request body validation
//!
//! Bodies are taken as loose JSON objects. Missing or mistyped fields map
//! to field-specific 400 messages.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{Map, Value};

use crate::{ApiError, ApiResult};

/// Unwrap a JSON body that must be an object
pub fn require_object(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Map<String, Value>> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest("JSON body required".to_string())),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            Err(ApiError::BadRequest("JSON body required".to_string()))
        }
    }
}

/// First non-empty trimmed string among `keys`, in order
///
/// Later keys are accepted aliases for the first one.
pub fn trimmed_string(payload: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Required string field using the `Field '<name>' ...` message
pub fn required_field(payload: &Map<String, Value>, keys: &[&str]) -> ApiResult<String> {
    trimmed_string(payload, keys).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Field '{}' (non-empty string) is required",
            keys.first().copied().unwrap_or_default()
        ))
    })
}

/// Required string field with a caller-supplied message
pub fn required_with_message(
    payload: &Map<String, Value>,
    key: &str,
    message: &str,
) -> ApiResult<String> {
    trimmed_string(payload, &[key]).ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

/// Optional string field; present but not a string is an error
pub fn optional_string(payload: &Map<String, Value>, key: &str) -> ApiResult<Option<String>> {
    match payload.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(_) => Err(ApiError::BadRequest(format!(
            "Field '{}' must be a string",
            key
        ))),
    }
}
