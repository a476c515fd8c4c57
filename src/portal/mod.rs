//! Portal session client.
//!
//! Wraps the fetch capability with the fixed header/cookie construction
//! needed to look like a browser session toward the iVAS portal. Exposes two
//! operations: a cheap reachability probe and the full document fetch.
//!
//! Transport failures stop here. Neither operation returns an error: the
//! probe reports `reachable: false` and the document fetch yields `None`,
//! so callers degrade to an empty record list instead of failing a request.

mod headers;
mod transport;

pub use headers::browser_headers;
pub use transport::{FetchResponse, HttpFetch, ReqwestFetcher};

use log::{debug, warn};

use crate::config::{DOCUMENT_TIMEOUT, MAX_BODY_PREVIEW_CHARS, PORTAL_LIVE_SMS_URL, PROBE_TIMEOUT};
use crate::cookies::CanonicalCookieSet;
use crate::utils::truncate_chars;

/// Result of a portal reachability probe.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// True iff the portal answered with 200 or 302
    pub reachable: bool,
    /// HTTP status, or 0 when the transport failed
    pub status_code: u16,
    /// First 500 characters of the response body
    pub body_preview: String,
    /// Transport error message, when one occurred
    pub error: Option<String>,
}

/// A cookie-authenticated session against the portal.
pub struct PortalClient<F> {
    fetcher: F,
    headers: Vec<(&'static str, String)>,
}

impl<F: HttpFetch> PortalClient<F> {
    /// Builds a client from a canonical cookie set and a fetch capability.
    pub fn new(cookies: &CanonicalCookieSet, fetcher: F) -> Self {
        Self {
            fetcher,
            headers: browser_headers(cookies),
        }
    }

    /// Probes whether the session cookies still reach the portal.
    ///
    /// A 302 counts as reachable: the portal redirects stale-but-known
    /// sessions to the login page, which still proves the host answered.
    pub async fn probe(&self) -> ProbeResult {
        match self
            .fetcher
            .get(PORTAL_LIVE_SMS_URL, &self.headers, PROBE_TIMEOUT)
            .await
        {
            Ok(response) => {
                let reachable = response.status == 200 || response.status == 302;
                debug!("portal probe: status {}", response.status);
                ProbeResult {
                    reachable,
                    status_code: response.status,
                    body_preview: truncate_chars(&response.body, MAX_BODY_PREVIEW_CHARS),
                    error: None,
                }
            }
            Err(e) => {
                warn!("portal probe failed: {e}");
                ProbeResult {
                    reachable: false,
                    status_code: 0,
                    body_preview: String::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Fetches the live SMS page.
    ///
    /// Returns the raw body only for an exact 200; any other status or a
    /// transport failure is logged and yields `None`, which callers map to
    /// an empty record list.
    pub async fn fetch_document(&self) -> Option<String> {
        match self
            .fetcher
            .get(PORTAL_LIVE_SMS_URL, &self.headers, DOCUMENT_TIMEOUT)
            .await
        {
            Ok(response) if response.status == 200 => Some(response.body),
            Ok(response) => {
                warn!(
                    "portal returned status {} for document fetch",
                    response.status
                );
                None
            }
            Err(e) => {
                warn!("portal document fetch failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::TransportError;
    use std::time::Duration;

    /// Canned transport for probe/fetch behavior tests.
    pub(crate) struct StubFetch {
        pub result: Result<FetchResponse, TransportError>,
    }

    impl HttpFetch for StubFetch {
        async fn get(
            &self,
            _url: &str,
            _headers: &[(&'static str, String)],
            _timeout: Duration,
        ) -> Result<FetchResponse, TransportError> {
            match &self.result {
                Ok(r) => Ok(r.clone()),
                Err(TransportError::Timeout) => Err(TransportError::Timeout),
                Err(TransportError::Connect(msg)) => Err(TransportError::Connect(msg.clone())),
                Err(TransportError::Other(msg)) => Err(TransportError::Other(msg.clone())),
            }
        }
    }

    fn client_with(result: Result<FetchResponse, TransportError>) -> PortalClient<StubFetch> {
        PortalClient::new(&CanonicalCookieSet::default(), StubFetch { result })
    }

    #[tokio::test]
    async fn test_probe_200_is_reachable() {
        let client = client_with(Ok(FetchResponse {
            status: 200,
            body: "live feed".into(),
        }));
        let probe = client.probe().await;
        assert!(probe.reachable);
        assert_eq!(probe.status_code, 200);
        assert_eq!(probe.body_preview, "live feed");
        assert!(probe.error.is_none());
    }

    #[tokio::test]
    async fn test_probe_302_is_reachable() {
        let client = client_with(Ok(FetchResponse {
            status: 302,
            body: String::new(),
        }));
        let probe = client.probe().await;
        assert!(probe.reachable);
        assert_eq!(probe.status_code, 302);
    }

    #[tokio::test]
    async fn test_probe_403_is_not_reachable() {
        let client = client_with(Ok(FetchResponse {
            status: 403,
            body: "blocked".into(),
        }));
        let probe = client.probe().await;
        assert!(!probe.reachable);
        assert_eq!(probe.status_code, 403);
    }

    #[tokio::test]
    async fn test_probe_timeout_yields_status_zero() {
        let client = client_with(Err(TransportError::Timeout));
        let probe = client.probe().await;
        assert!(!probe.reachable);
        assert_eq!(probe.status_code, 0);
        assert_eq!(probe.body_preview, "");
        assert_eq!(probe.error.as_deref(), Some("request timed out"));
    }

    #[tokio::test]
    async fn test_probe_preview_is_capped() {
        let client = client_with(Ok(FetchResponse {
            status: 200,
            body: "x".repeat(2000),
        }));
        let probe = client.probe().await;
        assert_eq!(probe.body_preview.chars().count(), 500);
    }

    #[tokio::test]
    async fn test_fetch_document_only_on_200() {
        let client = client_with(Ok(FetchResponse {
            status: 200,
            body: "<html>sms</html>".into(),
        }));
        assert_eq!(
            client.fetch_document().await.as_deref(),
            Some("<html>sms</html>")
        );

        let client = client_with(Ok(FetchResponse {
            status: 302,
            body: "redirect".into(),
        }));
        assert!(client.fetch_document().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_document_transport_failure_is_none() {
        let client = client_with(Err(TransportError::Connect("refused".into())));
        assert!(client.fetch_document().await.is_none());
    }
}
