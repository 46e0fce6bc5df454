use chrono::NaiveDate;

/// Canonical marker for categorical values that were missing or held a sentinel.
pub const UNKNOWN: &str = "Unknown";

/// Source columns, after header cleaning, that every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "transaction_id",
    "item",
    "quantity",
    "price_per_unit",
    "total_spent",
    "payment_method",
    "location",
    "transaction_date",
];

/// One source record exactly as read, keyed by the cleaned column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub transaction_id: String,
    pub item: String,
    pub quantity: String,
    pub price_per_unit: String,
    pub total_spent: String,
    pub payment_method: String,
    pub location: String,
    pub transaction_date: String,
}

/// A row after normalization. Measures and date are `None` when missing.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    pub transaction_id: String,
    pub item: String,
    pub quantity: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub total_spent: Option<f64>,
    pub payment_method: String,
    pub location: String,
    pub transaction_date: Option<NaiveDate>,
}

/// A row that passed the quality gate: every measure and the date are known.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub transaction_id: String,
    pub item: String,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total_spent: f64,
    pub payment_method: String,
    pub location: String,
    pub transaction_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub item_id: u32,
    pub item: String,
    pub price_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionEntry {
    pub id: u32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub transaction_id: String,
    pub transaction_date: NaiveDate,
    pub item_id: u32,
    pub payment_method_id: u32,
    pub location_id: u32,
    pub quantity: f64,
    pub total_spent: f64,
}
