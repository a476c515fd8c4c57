//! JSON response envelope.
//!
//! Every API response carries a `success` flag merged into the payload at the
//! top level, so clients branch on one field regardless of endpoint.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error_handling::AnalyzerError;

/// Wraps a successful payload, merging `"success": true` into its top level.
///
/// The payload must serialize to a JSON object; anything else is wrapped
/// under a `data` key instead of silently dropped.
pub fn success<T: Serialize>(payload: &T) -> Value {
    let mut object = match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
        Err(e) => {
            log::error!("payload serialization failed: {e}");
            let mut map = Map::new();
            map.insert("error".to_string(), Value::String(e.to_string()));
            return failure_value(&map);
        }
    };
    object.insert("success".to_string(), Value::Bool(true));
    Value::Object(object)
}

/// Maps a request-level error onto an HTTP status and failure envelope.
pub fn failure(error: &AnalyzerError) -> (StatusCode, Value) {
    let status = match error {
        AnalyzerError::EmptyCookieInput => StatusCode::BAD_REQUEST,
        AnalyzerError::MissingRequiredCookies { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AnalyzerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut body = json!({
        "success": false,
        "error": error.to_string(),
    });
    if let AnalyzerError::MissingRequiredCookies { parsed, .. } = error {
        body["parsed_cookies"] = json!(parsed);
    }
    (status, body)
}

fn failure_value(extra: &Map<String, Value>) -> Value {
    let mut map = extra.clone();
    map.insert("success".to_string(), Value::Bool(false));
    Value::Object(map)
}
