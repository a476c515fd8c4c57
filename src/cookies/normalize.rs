//! Canonical cookie normalization and validation.
//!
//! Different export tools label the same portal cookies differently (e.g.
//! Laravel's session cookie shows up as `ivas_sms_session`, `session` or
//! `laravel_session` depending on the exporter). Normalization reconciles
//! those aliases onto the fixed canonical set the portal expects.

use super::CookieMap;

/// Canonical cookie names with their accepted source aliases, in priority
/// order. The first alias present in the raw map with a non-empty value wins.
pub const CANONICAL_ALIASES: &[(&str, &[&str])] = &[
    ("cf_clearance", &["cf_clearance", "cf-clearance", "cloudflare"]),
    ("XSRF-TOKEN", &["XSRF-TOKEN", "xsrf-token", "csrf_token"]),
    (
        "ivas_sms_session",
        &["ivas_sms_session", "session", "laravel_session"],
    ),
    ("_ga", &["_ga", "ga"]),
    ("_gid", &["_gid", "gid"]),
    ("_fbp", &["_fbp", "fbp"]),
];

/// Canonical cookies the portal session cannot work without.
pub const REQUIRED_COOKIES: &[&str] = &["cf_clearance", "XSRF-TOKEN", "ivas_sms_session"];

/// A cookie mapping restricted to the canonical name set.
///
/// Only names from [`CANONICAL_ALIASES`] can ever appear here; canonical
/// names with no matching alias in the source map are absent, not nulled.
#[derive(Debug, Clone, Default)]
pub struct CanonicalCookieSet {
    entries: Vec<(&'static str, String)>,
}

impl CanonicalCookieSet {
    /// Looks up a canonical cookie value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of resolved canonical cookies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no canonical cookie was resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates resolved cookies in canonical declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Resolved canonical names, in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.to_string()).collect()
    }

    /// Builds the `Cookie` request header value (`name=value` joined by `; `).
    pub fn cookie_header(&self) -> String {
        self.entries
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Maps a raw decoded cookie map onto the canonical set.
///
/// For each canonical name the alias list is scanned in priority order and
/// the first alias present with a non-empty value is taken.
pub fn normalize(raw: &CookieMap) -> CanonicalCookieSet {
    let mut entries = Vec::new();
    for (canonical, aliases) in CANONICAL_ALIASES {
        for alias in *aliases {
            if let Some(value) = raw.get(*alias).filter(|v| !v.is_empty()) {
                entries.push((*canonical, value.clone()));
                break;
            }
        }
    }
    log::debug!(
        "normalized cookies: {:?}",
        entries.iter().map(|(n, _)| *n).collect::<Vec<_>>()
    );
    CanonicalCookieSet { entries }
}

/// Outcome of validating a canonical cookie set against the required subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// True iff every required cookie is present
    pub valid: bool,
    /// Required canonical names that are absent
    pub missing: Vec<&'static str>,
}

/// Checks that all required canonical cookies are present.
pub fn validate(set: &CanonicalCookieSet) -> Validation {
    let missing: Vec<&'static str> = REQUIRED_COOKIES
        .iter()
        .copied()
        .filter(|name| set.get(name).is_none())
        .collect();
    Validation {
        valid: missing.is_empty(),
        missing,
    }
}
