//! The outbound HTTP fetch capability.
//!
//! The portal client talks to the network through the [`HttpFetch`] trait so
//! tests can substitute a canned transport. The production implementation
//! wraps `reqwest` with redirects disabled: the probe needs to see the raw
//! 302 a live-but-unauthenticated session produces, not the login page it
//! points at.

use std::time::Duration;

use crate::error_handling::{InitializationError, TransportError};

/// A completed HTTP exchange: status plus body text.
///
/// Non-2xx statuses are ordinary values here, never errors; only transport
/// failures (timeout, DNS, refused connection) surface as `TransportError`.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

/// Capability to issue a GET request with fixed headers and a hard timeout.
#[allow(async_fn_in_trait)]
pub trait HttpFetch: Send + Sync {
    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only for transport-level failures; an HTTP
    /// error status is returned as a normal [`FetchResponse`].
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError>;
}

/// Production fetch capability backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates the shared HTTP client.
    ///
    /// Redirects are disabled so status codes like 302 are observed rather
    /// than followed. Timeouts are set per request, not on the client, since
    /// the probe and the document fetch use different deadlines.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if client construction
    /// fails.
    pub fn new() -> Result<Self, InitializationError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn get(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        timeout: Duration,
    ) -> Result<FetchResponse, TransportError> {
        let mut request = self.client.get(url).timeout(timeout);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}
