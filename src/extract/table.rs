//! Structural (table-based) record extraction.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::models::{Service, SmsRecord};
use crate::utils::parse_selector_with_fallback;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("table", "table extraction"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("tr", "table extraction"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("td, th", "table extraction"));

/// Extracts records from every table in the document.
///
/// Rows with at least four cells are mapped positionally:
/// sid, message, service, country, range (optional), content (optional,
/// defaulting to the message cell). Rows whose service cell matches none of
/// the tracked platforms are dropped entirely.
pub(super) fn extract_table_records(document: &Html, observed_at: &str) -> Vec<SmsRecord> {
    let mut records = Vec::new();

    for table in document.select(&TABLE_SELECTOR) {
        for row in table.select(&ROW_SELECTOR) {
            let cells: Vec<String> = row.select(&CELL_SELECTOR).map(cell_text).collect();
            if cells.len() < 4 {
                continue;
            }

            let Some(service) = Service::from_text(&cells[2]) else {
                continue;
            };

            records.push(SmsRecord {
                sid: cells[0].clone(),
                message: cells[1].clone(),
                service,
                country: cells[3].clone(),
                range: cells.get(4).cloned().unwrap_or_default(),
                content: cells.get(5).cloned().unwrap_or_else(|| cells[1].clone()),
                observed_at: observed_at.to_string(),
            });
        }
    }

    records
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
