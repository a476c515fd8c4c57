//! HTTP adapter exposing the analyzer as a JSON API.
//!
//! Endpoints:
//! - `POST /api/parse-cookies` - decode and validate a cookie blob
//! - `POST /api/test-connection` - probe the portal with the caller's cookies
//! - `POST /api/fetch-data` - fetch, extract and summarize SMS records
//! - `POST /api/stats` - fetch, filter and aggregate statistics
//! - `GET /health` - liveness check
//!
//! The adapter holds no state beyond the shared HTTP client; every request
//! runs the full pipeline from the cookies it carries.

mod handlers;

use axum::routing::{get, post};
use axum::Router;

use crate::portal::ReqwestFetcher;
use handlers::{fetch_data_handler, health_handler, parse_cookies_handler, stats_handler, test_connection_handler};

/// Shared state: the one HTTP client reused across requests.
#[derive(Clone)]
pub struct AppState {
    pub(crate) fetcher: ReqwestFetcher,
}

/// Builds the API router.
pub fn build_router(fetcher: ReqwestFetcher) -> Router {
    Router::new()
        .route("/api/parse-cookies", post(parse_cookies_handler))
        .route("/api/test-connection", post(test_connection_handler))
        .route("/api/fetch-data", post(fetch_data_handler))
        .route("/api/stats", post(stats_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { fetcher })
}

/// Binds the listener and serves the API until shutdown.
pub async fn start_server(port: u16, fetcher: ReqwestFetcher) -> Result<(), anyhow::Error> {
    let app = build_router(fetcher);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {}: {}", port, e))?;

    log::info!("API server listening on http://0.0.0.0:{}/", port);
    log::info!("  - Health: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
