//! Error type definitions.
//!
//! Two taxonomies live here:
//! - [`AnalyzerError`] is the request-level taxonomy: what went wrong from the
//!   API caller's point of view.
//! - [`TransportError`] classifies failures of the outbound fetch capability.
//!   It never escapes the portal client; there it is converted into a
//!   non-fatal "unreachable" / empty-document result.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Request-level errors surfaced to API callers.
///
/// Transport and extraction failures are deliberately absent: both are
/// absorbed at their component boundaries (unreachable probe result, empty
/// record list) and never fail a request.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The caller supplied no cookie input at all.
    #[error("No cookies provided")]
    EmptyCookieInput,

    /// Decoding succeeded but the required canonical cookies are incomplete.
    ///
    /// Carries the canonical names that were resolved, so callers can see
    /// how far alias resolution got.
    #[error("Missing required cookies: {}", missing.join(", "))]
    MissingRequiredCookies {
        /// Required canonical names absent after normalization
        missing: Vec<String>,
        /// Canonical names that were successfully resolved
        parsed: Vec<String>,
    },

    /// Any other internal failure (a defect, not bad third-party input).
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

/// Failure classification for the outbound HTTP fetch capability.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request exceeded its deadline.
    #[error("request timed out")]
    Timeout,

    /// DNS resolution or TCP/TLS connection failure.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}
