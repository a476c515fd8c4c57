//! Textual fallback extraction.
//!
//! Last-resort strategy for pages where the expected table layout is absent:
//! scan the visible text line by line and reconstruct records from keyword
//! and token heuristics. Inherently fuzzy; each derived field has a literal
//! placeholder for the not-found case.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{COUNTRY_SCAN_WINDOW_CHARS, MESSAGE_TRUNCATE_CHARS, MIN_CANDIDATE_LINE_CHARS};
use crate::models::{Service, SmsRecord};
use crate::utils::{char_tail, ellipsize};

/// A line must contain one of these (case-insensitive) to be considered.
const CANDIDATE_KEYWORDS: &[&str] = &["facebook", "instagram", "whatsapp", "sms", "message", "code"];

static SID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z0-9]{8,}").expect("SID pattern is a compile-time constant")
});

// A short all-caps country code, or a capitalized word sequence
static COUNTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]{2,3}|[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*")
        .expect("country pattern is a compile-time constant")
});

/// Scans visible text lines for SMS-shaped content.
pub(super) fn extract_text_records(text: &str, observed_at: &str) -> Vec<SmsRecord> {
    let mut records = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.chars().count() <= MIN_CANDIDATE_LINE_CHARS {
            continue;
        }
        let lower = line.to_lowercase();
        if !CANDIDATE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        // Lines without a tracked platform are discarded entirely
        let Some(service) = Service::from_text(line) else {
            continue;
        };

        let sid = SID_RE
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "N/A".to_string());

        let country = COUNTRY_RE
            .find(char_tail(line, COUNTRY_SCAN_WINDOW_CHARS))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        records.push(SmsRecord {
            sid,
            message: ellipsize(line, MESSAGE_TRUNCATE_CHARS),
            service,
            country,
            range: "N/A".to_string(),
            content: line.to_string(),
            observed_at: observed_at.to_string(),
        });
    }

    records
}
