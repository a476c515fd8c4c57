//! JSON request handlers.
//!
//! Each handler deserializes the shared request shape, delegates to the
//! matching operation in [`crate::ops`] and wraps the outcome in the response
//! envelope. Status codes come from the error kind, never from panics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use crate::envelope;
use crate::error_handling::AnalyzerError;
use crate::ops;
use crate::stats::RecordFilters;

/// Shared request body for all analyzer endpoints.
///
/// `service` and `country` are only meaningful for the stats endpoint and
/// ignored elsewhere.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Raw cookie blob in any supported encoding
    #[serde(default)]
    pub cookies: String,
    /// Optional service substring filter
    #[serde(default)]
    pub service: Option<String>,
    /// Optional country substring filter
    #[serde(default)]
    pub country: Option<String>,
}

fn respond<T: serde::Serialize>(result: Result<T, AnalyzerError>) -> Response {
    match result {
        Ok(payload) => (StatusCode::OK, Json(envelope::success(&payload))).into_response(),
        Err(error) => {
            log::warn!("request failed: {error}");
            let (status, body) = envelope::failure(&error);
            (status, Json(body)).into_response()
        }
    }
}

/// `POST /api/parse-cookies`
pub async fn parse_cookies_handler(Json(request): Json<AnalyzeRequest>) -> Response {
    respond(ops::parse_cookies(&request.cookies))
}

/// `POST /api/test-connection`
pub async fn test_connection_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    respond(ops::test_connection(&request.cookies, state.fetcher.clone()).await)
}

/// `POST /api/fetch-data`
pub async fn fetch_data_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    respond(ops::fetch_data(&request.cookies, state.fetcher.clone()).await)
}

/// `POST /api/stats`
pub async fn stats_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let filters = RecordFilters {
        service: request.service,
        country: request.country,
    };
    respond(ops::statistics(&request.cookies, &filters, state.fetcher.clone()).await)
}

/// `GET /health`
pub async fn health_handler() -> Response {
    let body = json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_empty_cookies() {
        let request: AnalyzeRequest = serde_json::from_str("{}").expect("empty body parses");
        assert_eq!(request.cookies, "");
        assert!(request.service.is_none());
        assert!(request.country.is_none());
    }

    #[test]
    fn test_request_with_filters() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"cookies":"a=1","service":"facebook","country":"US"}"#)
                .expect("body parses");
        assert_eq!(request.cookies, "a=1");
        assert_eq!(request.service.as_deref(), Some("facebook"));
    }
}
