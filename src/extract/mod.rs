//! SMS record extraction from portal HTML.
//!
//! The portal's page structure is not under our control, so extraction is
//! best-effort with two strategies applied in order:
//!
//! 1. **Structural**: table rows mapped positionally onto record fields.
//! 2. **Textual fallback**: line-scanning heuristics over the visible text,
//!    used only when the structural strategy yields nothing.
//!
//! Malformed or unexpected HTML never errors; the worst case is an empty
//! record list. A relevance guard short-circuits first: a page whose text
//! mentions neither "sms" nor "message" is almost certainly the login or an
//! error page, not the data page.

mod table;
mod text;

use chrono::Utc;
use log::debug;
use scraper::Html;

use crate::models::SmsRecord;

/// Extracts SMS records from a portal HTML document.
pub fn extract(html: &str) -> Vec<SmsRecord> {
    let document = Html::parse_document(html);
    let visible = visible_text(&document);
    let lower = visible.to_lowercase();

    if !lower.contains("sms") && !lower.contains("message") {
        debug!("page mentions neither sms nor message; treating as login/error page");
        return Vec::new();
    }

    // The page carries no per-record time, so all records from one document
    // share the extraction instant
    let observed_at = Utc::now().to_rfc3339();

    let records = table::extract_table_records(&document, &observed_at);
    if !records.is_empty() {
        debug!("structural strategy extracted {} record(s)", records.len());
        return records;
    }

    let records = text::extract_text_records(&visible, &observed_at);
    debug!("textual fallback extracted {} record(s)", records.len());
    records
}

/// Collects the document's visible text, preserving source line breaks so
/// the textual fallback can scan line by line.
fn visible_text(document: &Html) -> String {
    document.root_element().text().collect::<String>()
}
