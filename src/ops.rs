//! Request-level operations.
//!
//! One function per API endpoint, orchestrating the cookie pipeline, portal
//! client, extractor and aggregator. Each returns a serializable payload or
//! an [`AnalyzerError`]; the HTTP adapter only wraps these in the envelope.

use std::collections::BTreeMap;

use chrono::Utc;
use log::info;
use serde::Serialize;

use crate::config::{ALL_DATA_LIMIT, MAX_COOKIE_VALUE_PREVIEW_CHARS, RECENT_DATA_LIMIT};
use crate::cookies::{self, CanonicalCookieSet};
use crate::error_handling::AnalyzerError;
use crate::extract;
use crate::models::SmsRecord;
use crate::portal::{HttpFetch, PortalClient};
use crate::stats::{self, DistributionEntry, RecordFilters, StatsSnapshot, TimestampFallback};
use crate::utils::ellipsize;

/// Payload of the parse-cookies operation.
#[derive(Debug, Serialize)]
pub struct CookieSummary {
    /// Canonical cookies with values truncated for display
    pub cookies: BTreeMap<String, String>,
    /// Number of resolved canonical cookies
    pub cookie_count: usize,
}

/// Payload of the connection-test operation.
#[derive(Debug, Serialize)]
pub struct ConnectionReport {
    /// Whether the portal answered with 200 or 302
    pub connected: bool,
    /// HTTP status observed, 0 on transport failure
    pub status: u16,
    /// Capped body excerpt for debugging
    pub preview: String,
    /// Number of canonical cookies sent
    pub cookie_count: usize,
    /// Transport error message, absent when the request completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload of the fetch-data operation.
#[derive(Debug, Serialize)]
pub struct FetchSummary {
    /// Records extracted in this request
    pub total: usize,
    /// How many of them fall inside the recency window
    pub recent: usize,
    /// Most frequent services, descending
    pub top_services: Vec<(String, usize)>,
    /// Most frequent countries, descending
    pub top_countries: Vec<(String, usize)>,
    /// The recent records themselves, capped
    pub recent_data: Vec<SmsRecord>,
    /// All extracted records, capped
    pub all_data: Vec<SmsRecord>,
    /// When this summary was computed (RFC 3339)
    pub timestamp: String,
}

/// Aggregate block of the statistics payload.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    /// Records inside the recency window
    pub recent: usize,
    /// Per-service share of the filtered total
    pub service_distribution: BTreeMap<String, DistributionEntry>,
    /// Per-country share of the filtered total
    pub country_distribution: BTreeMap<String, DistributionEntry>,
}

/// Payload of the statistics operation.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Raw counts and hour buckets
    pub stats: StatsSnapshot,
    /// Distinct number ranges, capped
    pub ranges: Vec<String>,
    /// Derived distributions
    pub summary: StatsSummary,
}

/// Runs the cookie pipeline shared by every operation: trim, decode,
/// normalize, validate.
fn prepare_cookies(input: &str) -> Result<CanonicalCookieSet, AnalyzerError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AnalyzerError::EmptyCookieInput);
    }

    let raw = cookies::decode(input);
    let set = cookies::normalize(&raw);
    let validation = cookies::validate(&set);
    if !validation.valid {
        return Err(AnalyzerError::MissingRequiredCookies {
            missing: validation.missing.iter().map(|s| s.to_string()).collect(),
            parsed: set.names(),
        });
    }
    Ok(set)
}

/// Decodes and validates cookie input, reporting the canonical set with
/// display-safe value previews.
pub fn parse_cookies(input: &str) -> Result<CookieSummary, AnalyzerError> {
    let set = prepare_cookies(input)?;
    let cookies = set
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                ellipsize(value, MAX_COOKIE_VALUE_PREVIEW_CHARS),
            )
        })
        .collect();
    Ok(CookieSummary {
        cookies,
        cookie_count: set.len(),
    })
}

/// Probes the portal with the caller's cookies.
pub async fn test_connection<F: HttpFetch>(
    input: &str,
    fetcher: F,
) -> Result<ConnectionReport, AnalyzerError> {
    let set = prepare_cookies(input)?;
    let cookie_count = set.len();
    let client = PortalClient::new(&set, fetcher);
    let probe = client.probe().await;
    info!(
        "connection test: connected={} status={}",
        probe.reachable, probe.status_code
    );
    Ok(ConnectionReport {
        connected: probe.reachable,
        status: probe.status_code,
        preview: probe.body_preview,
        cookie_count,
        error: probe.error,
    })
}

/// Fetches the live page, extracts records and summarizes them.
///
/// An unreachable portal or an unparseable page is not an error; it shows up
/// as zero records.
pub async fn fetch_data<F: HttpFetch>(
    input: &str,
    fetcher: F,
) -> Result<FetchSummary, AnalyzerError> {
    let set = prepare_cookies(input)?;
    let client = PortalClient::new(&set, fetcher);

    let records = match client.fetch_document().await {
        Some(html) => extract::extract(&html),
        None => Vec::new(),
    };
    info!("fetch-data extracted {} record(s)", records.len());

    let cutoff = stats::recent_cutoff(Utc::now());
    // Records with unreadable timestamps stay out of the recent list
    let recent = stats::recent_records(&records, cutoff, TimestampFallback::NotRecent);

    let top_services = stats::rank_by_count(records.iter().map(|r| r.service.as_str()));
    let top_countries = stats::rank_by_count(records.iter().map(|r| r.country.as_str()));

    Ok(FetchSummary {
        total: records.len(),
        recent: recent.len(),
        top_services,
        top_countries,
        recent_data: recent.into_iter().take(RECENT_DATA_LIMIT).collect(),
        all_data: records.into_iter().take(ALL_DATA_LIMIT).collect(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Fetches, filters and aggregates records into the statistics payload.
pub async fn statistics<F: HttpFetch>(
    input: &str,
    filters: &RecordFilters,
    fetcher: F,
) -> Result<StatsReport, AnalyzerError> {
    let set = prepare_cookies(input)?;
    let client = PortalClient::new(&set, fetcher);

    let records = match client.fetch_document().await {
        Some(html) => extract::extract(&html),
        None => Vec::new(),
    };
    let records = stats::filter_records(records, filters);
    info!("stats over {} filtered record(s)", records.len());

    let snapshot = stats::snapshot(&records);

    let cutoff = stats::recent_cutoff(Utc::now());
    // Here an unreadable timestamp counts as recent, unlike fetch-data
    let recent = stats::recent_records(&records, cutoff, TimestampFallback::Recent);

    let summary = StatsSummary {
        recent: recent.len(),
        service_distribution: stats::distribution(&snapshot.by_service, snapshot.total),
        country_distribution: stats::distribution(&snapshot.by_country, snapshot.total),
    };

    let ranges = snapshot.ranges.clone();
    Ok(StatsReport {
        stats: snapshot,
        ranges,
        summary,
    })
}
