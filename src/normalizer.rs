use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::models::{CanonicalRow, RawRow, UNKNOWN};
use crate::reconciler::coerce_numeric;

/// Placeholder strings the export writes instead of leaving a cell empty.
pub const SENTINELS: &[&str] = &["ERROR", "UNKNOWN"];

/// Cell spellings the reader treats as an empty value (the usual CSV NA list).
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn clean_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Token checks compare the whole cell; surrounding whitespace is kept and
/// makes the cell a real value.
pub fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

pub fn is_sentinel(raw: &str) -> bool {
    SENTINELS.contains(&raw)
}

fn categorical(raw: &str) -> String {
    if is_missing(raw) || is_sentinel(raw) {
        UNKNOWN.to_string()
    } else {
        raw.to_string()
    }
}

/// Lenient date parse. Unparsable input is `None`, never an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if is_missing(raw) || is_sentinel(raw) {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// normalize_rows
// ---------------------------------------------------------------------------

pub struct NormalizeResult {
    pub rows: Vec<CanonicalRow>,
    /// Rows discarded for lacking a transaction id.
    pub dropped: usize,
}

fn canonicalize(raw: &RawRow) -> CanonicalRow {
    let transaction_date = parse_date(&raw.transaction_date);
    if transaction_date.is_none() && !is_missing(&raw.transaction_date) {
        debug!(
            transaction_id = %raw.transaction_id,
            value = %raw.transaction_date,
            "unparsable transaction_date"
        );
    }
    CanonicalRow {
        transaction_id: raw.transaction_id.clone(),
        item: categorical(&raw.item),
        quantity: coerce_numeric(&raw.quantity),
        price_per_unit: coerce_numeric(&raw.price_per_unit),
        total_spent: coerce_numeric(&raw.total_spent),
        payment_method: categorical(&raw.payment_method),
        location: categorical(&raw.location),
        transaction_date,
    }
}

pub fn normalize_rows(raw_rows: &[RawRow]) -> NormalizeResult {
    let mut rows = Vec::with_capacity(raw_rows.len());
    let mut dropped = 0usize;
    for raw in raw_rows {
        if is_missing(&raw.transaction_id) {
            dropped += 1;
            continue;
        }
        rows.push(canonicalize(raw));
    }
    info!(kept = rows.len(), dropped, "normalized rows");
    NormalizeResult { rows, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, item: &str, qty: &str, price: &str, total: &str, date: &str) -> RawRow {
        RawRow {
            transaction_id: id.to_string(),
            item: item.to_string(),
            quantity: qty.to_string(),
            price_per_unit: price.to_string(),
            total_spent: total.to_string(),
            payment_method: "Cash".to_string(),
            location: "In-store".to_string(),
            transaction_date: date.to_string(),
        }
    }

    #[test]
    fn test_clean_column_name() {
        assert_eq!(clean_column_name(" Transaction ID "), "transaction_id");
        assert_eq!(clean_column_name("Price Per Unit"), "price_per_unit");
        assert_eq!(clean_column_name("item"), "item");
    }

    #[test]
    fn test_sentinels_become_unknown() {
        let mut r = raw("T1", "ERROR", "1", "2", "2", "2024-01-01");
        r.payment_method = "UNKNOWN".to_string();
        r.location = String::new();
        let result = normalize_rows(&[r]);
        let row = &result.rows[0];
        assert_eq!(row.item, UNKNOWN);
        assert_eq!(row.payment_method, UNKNOWN);
        assert_eq!(row.location, UNKNOWN);
    }

    #[test]
    fn test_sentinel_match_is_case_sensitive() {
        let r = raw("T1", "Error", "1", "2", "2", "2024-01-01");
        let result = normalize_rows(&[r]);
        assert_eq!(result.rows[0].item, "Error");
    }

    #[test]
    fn test_rows_without_id_are_dropped() {
        let rows = vec![
            raw("", "Tea", "1", "3", "3", "2024-01-01"),
            raw("T2", "Tea", "1", "3", "3", "2024-01-01"),
            raw("NaN", "Tea", "1", "3", "3", "2024-01-01"),
        ];
        let result = normalize_rows(&rows);
        assert_eq!(result.dropped, 2);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].transaction_id, "T2");
    }

    #[test]
    fn test_na_spellings_count_as_missing() {
        let rows = vec![
            raw("n/a", "Tea", "1", "3", "3", "2024-01-01"),
            raw("T2", "n/a", "1", "3", "3", "2024-01-01"),
            raw("T3", "<NA>", "1", "3", "3", "2024-01-01"),
            raw("T4", "#N/A N/A", "-nan", "1.#QNAN", "3", "2024-01-01"),
        ];
        let result = normalize_rows(&rows);
        assert_eq!(result.dropped, 1);
        let items: Vec<&str> = result.rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec![UNKNOWN, UNKNOWN, UNKNOWN]);
        assert_eq!(result.rows[2].quantity, None);
        assert_eq!(result.rows[2].price_per_unit, None);
    }

    #[test]
    fn test_tokens_match_whole_cell_only() {
        let rows = vec![
            raw("T1", " ERROR", "1", "3", "3", "2024-01-01"),
            raw("T2", "Tea ", "1", "3", "3", "2024-01-01"),
            raw(" ", "ERROR", "1", "3", "3", "2024-01-01"),
        ];
        let result = normalize_rows(&rows);
        assert_eq!(result.dropped, 0);
        assert_eq!(result.rows[0].item, " ERROR");
        assert_eq!(result.rows[1].item, "Tea ");
        assert_eq!(result.rows[2].item, UNKNOWN);
    }

    #[test]
    fn test_numeric_sentinels_become_missing() {
        let r = raw("T1", "Latte", "2", "ERROR", "UNKNOWN", "2024-01-01");
        let row = &normalize_rows(&[r]).rows[0];
        assert_eq!(row.quantity, Some(2.0));
        assert_eq!(row.price_per_unit, None);
        assert_eq!(row.total_spent, None);
    }

    #[test]
    fn test_parse_date() {
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(parse_date("2024-01-02"), jan2);
        assert_eq!(parse_date("2024/01/02"), jan2);
        assert_eq!(parse_date("01/02/2024"), jan2);
        assert_eq!(parse_date("2024-01-02 13:45:00"), jan2);
        assert_eq!(parse_date("ERROR"), None);
        assert_eq!(parse_date("UNKNOWN"), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(""), None);
    }
}
