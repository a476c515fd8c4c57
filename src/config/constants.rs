//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including portal endpoints, timeouts, and output limits.

use std::time::Duration;

/// The iVAS portal live SMS endpoint.
///
/// Both the connection probe and the document fetch hit this single page;
/// the portal exposes its live test-SMS feed there when the session cookies
/// are valid, and redirects to the login page when they are not.
pub const PORTAL_LIVE_SMS_URL: &str = "https://www.ivasms.com/portal/live/test_sms";

/// Browser User-Agent presented to the portal.
///
/// The portal sits behind Cloudflare; a non-browser User-Agent gets the
/// challenge page instead of the SMS feed, so this value is fixed rather
/// than configurable.
pub const PORTAL_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Timeout for the lightweight connection probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the full document fetch
/// The live feed page can be slow when the portal is under load, so this is
/// deliberately more generous than the probe timeout
pub const DOCUMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum probe body preview length in characters
pub const MAX_BODY_PREVIEW_CHARS: usize = 500;
/// Maximum cookie value length echoed back by the parse-cookies operation
/// Longer values are truncated with an ellipsis so session tokens never
/// round-trip in full through API responses or logs
pub const MAX_COOKIE_VALUE_PREVIEW_CHARS: usize = 50;

/// Minimum input length for the direct `k=v` cookie parse when no `;` is present
/// A short `=`-bearing string without a separator is more likely a base64
/// payload that happens to contain padding than a single-cookie export
pub const DIRECT_PARSE_MIN_LEN: usize = 50;

/// Recency window in minutes for the "recent" record views
pub const RECENT_WINDOW_MINUTES: i64 = 5;
/// Number of entries kept in the top-services / top-countries rankings
pub const TOP_RANKING_LIMIT: usize = 10;
/// Maximum records returned in the recent-data list
pub const RECENT_DATA_LIMIT: usize = 20;
/// Maximum records returned in the all-data list
pub const ALL_DATA_LIMIT: usize = 100;
/// Maximum distinct number ranges reported by the statistics view
pub const MAX_DISTINCT_RANGES: usize = 20;

// Textual fallback extraction tuning
/// Minimum line length (in characters) for a text line to be considered
pub const MIN_CANDIDATE_LINE_CHARS: usize = 10;
/// Maximum message length before truncation in extracted records
pub const MESSAGE_TRUNCATE_CHARS: usize = 100;
/// How many trailing characters of a line are scanned for a country token
pub const COUNTRY_SCAN_WINDOW_CHARS: usize = 50;

/// Default port for the JSON API server
pub const DEFAULT_PORT: u16 = 5000;
