//! Record aggregation: filtering, ranking, recency windows, distributions.
//!
//! Everything here is recomputed from scratch per request; there is no
//! caching and no shared state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::{MAX_DISTINCT_RANGES, RECENT_WINDOW_MINUTES, TOP_RANKING_LIMIT};
use crate::models::SmsRecord;

/// Optional substring filters applied on top of the extractor's fixed
/// social-platform keep-set (never instead of it).
#[derive(Debug, Clone, Default)]
pub struct RecordFilters {
    /// Case-insensitive substring matched against the service name
    pub service: Option<String>,
    /// Case-insensitive substring matched against the country
    pub country: Option<String>,
}

/// How to treat a record whose timestamp fails to parse when deciding
/// recency.
///
/// The two API views intentionally disagree: the fetch view excludes such
/// records from its recent list while the stats view includes them. Both
/// behaviors are pinned at their call sites; do not unify without checking
/// both consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFallback {
    /// An unparseable timestamp makes the record not recent
    NotRecent,
    /// An unparseable timestamp makes the record recent
    Recent,
}

/// Derived, read-only aggregate over a record list.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Number of records after filtering
    pub total: usize,
    /// Occurrence count per canonical service name
    pub by_service: BTreeMap<String, usize>,
    /// Occurrence count per country
    pub by_country: BTreeMap<String, usize>,
    /// Occurrence count per hour of day (0–23), from parseable timestamps
    pub by_hour: BTreeMap<u32, usize>,
    /// Distinct number ranges, capped, placeholder values excluded
    pub ranges: Vec<String>,
}

/// A count with its share of the filtered total.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionEntry {
    /// Occurrence count
    pub count: usize,
    /// `round(count / total * 100)`; 0 when the total is 0
    pub percentage: u32,
}

/// Keeps records matching both optional substring filters.
pub fn filter_records(records: Vec<SmsRecord>, filters: &RecordFilters) -> Vec<SmsRecord> {
    let service_filter = filters.service.as_deref().map(str::to_lowercase);
    let country_filter = filters.country.as_deref().map(str::to_lowercase);

    records
        .into_iter()
        .filter(|record| {
            let service = record.service.as_str().to_lowercase();
            let country = record.country.to_lowercase();
            service_filter
                .as_deref()
                .is_none_or(|f| service.contains(f))
                && country_filter
                    .as_deref()
                    .is_none_or(|f| country.contains(f))
        })
        .collect()
}

/// Ranks values by descending occurrence count.
///
/// The sort is stable, so equal counts keep first-encountered order. The
/// result is truncated to the top-ranking limit.
pub fn rank_by_count<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(name, _)| name == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_RANKING_LIMIT);
    counts
}

/// The cutoff instant for the recency window.
pub fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(RECENT_WINDOW_MINUTES)
}

/// Whether a record's timestamp is strictly after the cutoff.
pub fn is_recent(observed_at: &str, cutoff: DateTime<Utc>, fallback: TimestampFallback) -> bool {
    match DateTime::parse_from_rfc3339(observed_at) {
        Ok(ts) => ts.with_timezone(&Utc) > cutoff,
        Err(_) => fallback == TimestampFallback::Recent,
    }
}

/// Records within the recency window, with the given parse-failure policy.
pub fn recent_records(
    records: &[SmsRecord],
    cutoff: DateTime<Utc>,
    fallback: TimestampFallback,
) -> Vec<SmsRecord> {
    records
        .iter()
        .filter(|r| is_recent(&r.observed_at, cutoff, fallback))
        .cloned()
        .collect()
}

/// Computes the full statistics snapshot over a filtered record list.
pub fn snapshot(records: &[SmsRecord]) -> StatsSnapshot {
    let mut by_service: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_country: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, usize> = BTreeMap::new();
    let mut ranges: BTreeSet<String> = BTreeSet::new();

    for record in records {
        *by_service
            .entry(record.service.as_str().to_string())
            .or_insert(0) += 1;
        *by_country.entry(record.country.clone()).or_insert(0) += 1;

        if !record.range.is_empty() && record.range != "N/A" {
            ranges.insert(record.range.clone());
        }

        // Unparseable timestamps contribute no hour bucket
        if let Ok(ts) = DateTime::parse_from_rfc3339(&record.observed_at) {
            use chrono::Timelike;
            *by_hour.entry(ts.hour()).or_insert(0) += 1;
        }
    }

    StatsSnapshot {
        total: records.len(),
        by_service,
        by_country,
        by_hour,
        ranges: ranges.into_iter().take(MAX_DISTINCT_RANGES).collect(),
    }
}

/// Percentage of `count` in `total`, rounded; 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// Turns a count map into a percentage distribution over `total`.
pub fn distribution(
    counts: &BTreeMap<String, usize>,
    total: usize,
) -> BTreeMap<String, DistributionEntry> {
    counts
        .iter()
        .map(|(name, &count)| {
            (
                name.clone(),
                DistributionEntry {
                    count,
                    percentage: percentage(count, total),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Service;

    fn record(service: Service, country: &str, observed_at: &str) -> SmsRecord {
        SmsRecord {
            sid: "SID".into(),
            message: "m".into(),
            service,
            country: country.into(),
            range: "N/A".into(),
            content: "m".into(),
            observed_at: observed_at.into(),
        }
    }

    fn now_rfc3339() -> String {
        Utc::now().to_rfc3339()
    }

    #[test]
    fn test_service_filter_is_substring_and_case_insensitive() {
        let records = vec![
            record(Service::Facebook, "US", &now_rfc3339()),
            record(Service::WhatsApp, "US", &now_rfc3339()),
        ];
        let filters = RecordFilters {
            service: Some("FACE".into()),
            country: None,
        };
        let kept = filter_records(records, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].service, Service::Facebook);
    }

    #[test]
    fn test_both_filters_must_match() {
        let records = vec![
            record(Service::Facebook, "Germany", &now_rfc3339()),
            record(Service::Facebook, "France", &now_rfc3339()),
        ];
        let filters = RecordFilters {
            service: Some("facebook".into()),
            country: Some("ger".into()),
        };
        assert_eq!(filter_records(records, &filters).len(), 1);
    }

    #[test]
    fn test_no_filters_keep_everything() {
        let records = vec![record(Service::Instagram, "US", &now_rfc3339())];
        assert_eq!(
            filter_records(records, &RecordFilters::default()).len(),
            1
        );
    }

    #[test]
    fn test_ranking_descending_with_stable_ties() {
        let values = ["b", "a", "a", "c", "b"];
        let ranked = rank_by_count(values.iter().copied());
        // a and b both have 2; b was encountered first
        assert_eq!(ranked[0], ("b".to_string(), 2));
        assert_eq!(ranked[1], ("a".to_string(), 2));
        assert_eq!(ranked[2], ("c".to_string(), 1));
    }

    #[test]
    fn test_ranking_truncates_to_limit() {
        let values: Vec<String> = (0..15).map(|i| format!("v{i}")).collect();
        let ranked = rank_by_count(values.iter().map(String::as_str));
        assert_eq!(ranked.len(), TOP_RANKING_LIMIT);
    }

    #[test]
    fn test_is_recent_boundary_is_strict() {
        let now = Utc::now();
        let cutoff = recent_cutoff(now);
        assert!(!is_recent(
            &cutoff.to_rfc3339(),
            cutoff,
            TimestampFallback::NotRecent
        ));
        assert!(is_recent(
            &now.to_rfc3339(),
            cutoff,
            TimestampFallback::NotRecent
        ));
    }

    #[test]
    fn test_parse_failure_policies_diverge() {
        let cutoff = recent_cutoff(Utc::now());
        assert!(!is_recent("garbage", cutoff, TimestampFallback::NotRecent));
        assert!(is_recent("garbage", cutoff, TimestampFallback::Recent));
    }

    #[test]
    fn test_snapshot_counts() {
        let records = vec![
            record(Service::Facebook, "US", "2026-08-25T10:15:00+00:00"),
            record(Service::Facebook, "DE", "2026-08-25T10:45:00+00:00"),
            record(Service::Instagram, "US", "2026-08-25T23:05:00+00:00"),
        ];
        let snap = snapshot(&records);
        assert_eq!(snap.total, 3);
        assert_eq!(snap.by_service["Facebook"], 2);
        assert_eq!(snap.by_service["Instagram"], 1);
        assert_eq!(snap.by_country["US"], 2);
        assert_eq!(snap.by_hour[&10], 2);
        assert_eq!(snap.by_hour[&23], 1);
        assert!(snap.ranges.is_empty());
    }

    #[test]
    fn test_snapshot_skips_unparseable_hours_and_placeholder_ranges() {
        let mut with_range = record(Service::WhatsApp, "KE", "not-a-timestamp");
        with_range.range = "+2547x".into();
        let snap = snapshot(&[with_range]);
        assert_eq!(snap.total, 1);
        assert!(snap.by_hour.is_empty());
        assert_eq!(snap.ranges, vec!["+2547x".to_string()]);
    }

    #[test]
    fn test_percentage_distribution() {
        let records: Vec<SmsRecord> = (0..6)
            .map(|_| record(Service::Facebook, "US", &now_rfc3339()))
            .chain((0..4).map(|_| record(Service::Instagram, "US", &now_rfc3339())))
            .collect();
        let snap = snapshot(&records);
        let dist = distribution(&snap.by_service, snap.total);
        assert_eq!(dist["Facebook"].percentage, 60);
        assert_eq!(dist["Instagram"].percentage, 40);
    }

    #[test]
    fn test_zero_records_no_division_by_zero() {
        let snap = snapshot(&[]);
        assert_eq!(snap.total, 0);
        let dist = distribution(&snap.by_service, snap.total);
        assert!(dist.is_empty());
        assert_eq!(percentage(0, 0), 0);
    }
}
