//! Request decoding and validation helpers.

use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult, BODY_NOT_JSON};

/// Whether the request declares a JSON body (`application/json` or `application/*+json`).
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Decode a request body as JSON.
///
/// Bodies without a JSON content type, and empty bodies, decode as an empty
/// object so that field validation, not the decoder, decides the response.
pub fn parse_body(headers: &HeaderMap, body: &Bytes) -> ApiResult<Value> {
    if !has_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting malformed JSON body");
        ApiError::invalid_body("body", BODY_NOT_JSON)
    })
}

/// Parse the `:id` path segment.
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::invalid_id(raw))
}

/// The two text fields required by create and full update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoFields<'a> {
    pub tasks: &'a str,
    pub due_date: &'a str,
}

impl<'a> TodoFields<'a> {
    /// `None` unless both `tasks` and `due_date` are JSON strings.
    pub fn from_body(body: &'a Value) -> Option<Self> {
        let tasks = body.get("tasks")?.as_str()?;
        let due_date = body.get("due_date")?.as_str()?;
        Some(Self { tasks, due_date })
    }
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
