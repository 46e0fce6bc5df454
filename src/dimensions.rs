use std::collections::HashSet;

use tracing::info;

use crate::models::{CleanRow, DimensionEntry, ItemEntry};

/// Categorical columns that get a plain single-value dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    PaymentMethod,
    Location,
}

impl Attribute {
    pub fn column(&self) -> &'static str {
        match self {
            Self::PaymentMethod => "payment_method",
            Self::Location => "location",
        }
    }

    pub fn id_column(&self) -> &'static str {
        match self {
            Self::PaymentMethod => "payment_method_id",
            Self::Location => "location_id",
        }
    }

    pub fn value<'a>(&self, row: &'a CleanRow) -> &'a str {
        match self {
            Self::PaymentMethod => &row.payment_method,
            Self::Location => &row.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub attribute: Attribute,
    pub entries: Vec<DimensionEntry>,
}

pub fn is_unknown(value: &str) -> bool {
    value.eq_ignore_ascii_case("unknown")
}

/// Real values ascending case-insensitively, "Unknown" last. The sort is
/// stable, so values that compare equal keep first-seen order.
fn sort_unknowns_last<T>(values: &mut [T], name: impl Fn(&T) -> &str) {
    values.sort_by_key(|v| {
        let label = name(v);
        (is_unknown(label), label.to_lowercase())
    });
}

pub fn build_dimension(rows: &[CleanRow], attribute: Attribute) -> Dimension {
    let mut seen = HashSet::new();
    let mut values: Vec<&str> = rows
        .iter()
        .map(|r| attribute.value(r))
        .filter(|v| seen.insert(*v))
        .collect();
    sort_unknowns_last(&mut values, |v| *v);

    let entries: Vec<DimensionEntry> = values
        .into_iter()
        .zip(1u32..)
        .map(|(value, id)| DimensionEntry {
            id,
            value: value.to_string(),
        })
        .collect();
    info!(dimension = attribute.column(), entries = entries.len(), "built dimension");
    Dimension { attribute, entries }
}

/// Hashable identity of a unit price. Signed zeros share one key.
pub fn price_key(price: f64) -> u64 {
    if price == 0.0 {
        0.0f64.to_bits()
    } else {
        price.to_bits()
    }
}

/// Items are identified by name and resolved unit price together.
pub fn build_item_dimension(rows: &[CleanRow]) -> Vec<ItemEntry> {
    let mut seen = HashSet::new();
    let mut pairs: Vec<(&str, f64)> = rows
        .iter()
        .map(|r| (r.item.as_str(), r.price_per_unit))
        .filter(|(item, price)| seen.insert((*item, price_key(*price))))
        .collect();
    sort_unknowns_last(&mut pairs, |pair| pair.0);

    let entries: Vec<ItemEntry> = pairs
        .into_iter()
        .zip(1u32..)
        .map(|((item, price_per_unit), item_id)| ItemEntry {
            item_id,
            item: item.to_string(),
            price_per_unit,
        })
        .collect();
    info!(dimension = "item", entries = entries.len(), "built dimension");
    entries
}
