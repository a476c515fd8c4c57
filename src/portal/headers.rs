//! Fixed browser-mimicking request headers.

use crate::config::PORTAL_USER_AGENT;
use crate::cookies::CanonicalCookieSet;

/// Builds the full header set for a portal request, including the `Cookie`
/// header assembled from the canonical cookie set.
///
/// Everything except the cookie values is static: the portal's Cloudflare
/// front end expects a coherent browser-shaped header profile, and changing
/// individual values tends to trip its heuristics.
pub fn browser_headers(cookies: &CanonicalCookieSet) -> Vec<(&'static str, String)> {
    vec![
        ("User-Agent", PORTAL_USER_AGENT.to_string()),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
        ),
        ("Accept-Language", "en-US,en;q=0.5".to_string()),
        ("Accept-Encoding", "gzip, deflate, br".to_string()),
        ("DNT", "1".to_string()),
        ("Connection", "keep-alive".to_string()),
        ("Upgrade-Insecure-Requests", "1".to_string()),
        ("Sec-Fetch-Dest", "document".to_string()),
        ("Sec-Fetch-Mode", "navigate".to_string()),
        ("Sec-Fetch-Site", "none".to_string()),
        ("Sec-Fetch-User", "?1".to_string()),
        ("Cookie", cookies.cookie_header()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{normalize, CookieMap};

    #[test]
    fn test_cookie_header_is_included() {
        let raw: CookieMap = [("cf_clearance", "abc"), ("XSRF-TOKEN", "tok")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let headers = browser_headers(&normalize(&raw));
        let cookie = headers
            .iter()
            .find(|(name, _)| *name == "Cookie")
            .map(|(_, v)| v.as_str());
        assert_eq!(cookie, Some("cf_clearance=abc; XSRF-TOKEN=tok"));
    }

    #[test]
    fn test_user_agent_is_browser_shaped() {
        let headers = browser_headers(&CanonicalCookieSet::default());
        let ua = headers
            .iter()
            .find(|(name, _)| *name == "User-Agent")
            .map(|(_, v)| v.as_str())
            .unwrap_or_default();
        assert!(ua.contains("Mozilla/5.0"));
    }
}
