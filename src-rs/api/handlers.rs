use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::server::AppState;

pub const SAD_MOOD: &str = "😢";

/// Both fields are optional and untyped: `user_id` is echoed as sent, and a
/// mood that is missing or not a string simply isn't sad.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MoodRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub mood: Option<Value>,
}

impl MoodRequest {
    /// Reads the body regardless of `Content-Type`. An empty body or a JSON
    /// value that isn't an object carries no fields; only non-JSON is an error.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| ApiError::BadRequest(format!("invalid JSON body: {}", err)))?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|err| ApiError::BadRequest(format!("invalid JSON body: {}", err))),
            _ => Ok(Self::default()),
        }
    }

    pub fn is_sad(&self) -> bool {
        self.mood.as_ref().and_then(Value::as_str) == Some(SAD_MOOD)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TipResponse {
    pub user_id: Option<Value>,
    pub timestamp: String,
    pub tip: String,
}

pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.cache.snapshot();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "tips": snapshot,
    }))
}

pub async fn handle_microtips(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req = MoodRequest::from_body(&body)?;

    if !req.is_sad() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let dispensed = state.cache.dispense();
    debug!(user_id = ?req.user_id, position = dispensed.position, "serving tip");
    Ok(Json(TipResponse {
        user_id: req.user_id,
        timestamp: format_timestamp((state.clock)()),
        tip: dispensed.tip,
    })
    .into_response())
}

/// `2026-10-16T08:30:00.123Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
