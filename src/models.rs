//! Core data types: SMS records and the tracked social platforms.

use serde::{Deserialize, Serialize};

/// The social platforms whose SMS traffic is tracked.
///
/// Extraction drops every row or line that does not match one of these
/// platforms; there is deliberately no "other" bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    /// Facebook (keywords: "facebook", "fb")
    Facebook,
    /// Instagram (keywords: "instagram", "ig")
    Instagram,
    /// WhatsApp (keywords: "whatsapp", "wa")
    WhatsApp,
}

impl Service {
    /// Returns the canonical platform name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Facebook => "Facebook",
            Service::Instagram => "Instagram",
            Service::WhatsApp => "WhatsApp",
        }
    }

    /// Matches free text against the platform keyword sets.
    ///
    /// Keyword sets are checked in a fixed order (Facebook, Instagram,
    /// WhatsApp) and the first match wins. The short aliases are plain
    /// substring matches, exactly as the portal's service labels use them,
    /// so e.g. "FB-OTP" resolves to Facebook.
    pub fn from_text(text: &str) -> Option<Service> {
        let lower = text.to_lowercase();
        if lower.contains("facebook") || lower.contains("fb") {
            Some(Service::Facebook)
        } else if lower.contains("instagram") || lower.contains("ig") {
            Some(Service::Instagram)
        } else if lower.contains("whatsapp") || lower.contains("wa") {
            Some(Service::WhatsApp)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted SMS event.
///
/// Created once per extracted table row or text line, immutable afterwards,
/// and held only in memory for the duration of a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsRecord {
    /// Sender/session identifier as shown by the portal ("N/A" when the
    /// textual fallback could not find one)
    pub sid: String,
    /// Message text, truncated for display
    pub message: String,
    /// The matched social platform
    pub service: Service,
    /// Country as free text ("Unknown" when undetected)
    pub country: String,
    /// Number range, where the portal provides one ("N/A" otherwise)
    pub range: String,
    /// Full untruncated content
    pub content: String,
    /// RFC 3339 timestamp stamped at extraction time.
    ///
    /// The portal page carries no per-record timestamp, so this records when
    /// we observed the row, not when the SMS happened.
    #[serde(rename = "timestamp")]
    pub observed_at: String,
}
