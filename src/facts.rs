use std::collections::HashMap;
use std::hash::Hash;

use tracing::info;

use crate::dimensions::{price_key, Dimension};
use crate::error::{EtlError, Result};
use crate::models::{CleanRow, FactRow, ItemEntry};

/// Lookup index over a dimension. A key present twice means the dimension was
/// built wrong, so it is reported instead of picking one.
fn index<K, I>(dimension: &'static str, entries: I) -> Result<HashMap<K, u32>>
where
    K: Eq + Hash + std::fmt::Debug,
    I: IntoIterator<Item = (K, u32)>,
{
    let mut map = HashMap::new();
    for (key, id) in entries {
        if map.contains_key(&key) {
            return Err(EtlError::AmbiguousJoin {
                dimension,
                key: format!("{key:?}"),
            });
        }
        map.insert(key, id);
    }
    Ok(map)
}

fn lookup<K>(dimension: &'static str, map: &HashMap<K, u32>, key: &K) -> Result<u32>
where
    K: Eq + Hash + std::fmt::Debug,
{
    map.get(key).copied().ok_or_else(|| EtlError::JoinMiss {
        dimension,
        key: format!("{key:?}"),
    })
}

pub fn assemble_facts(
    rows: &[CleanRow],
    items: &[ItemEntry],
    payment_methods: &Dimension,
    locations: &Dimension,
) -> Result<Vec<FactRow>> {
    let item_ids = index(
        "item",
        items
            .iter()
            .map(|e| ((e.item.as_str(), price_key(e.price_per_unit)), e.item_id)),
    )?;
    let payment_ids = index(
        payment_methods.attribute.column(),
        payment_methods.entries.iter().map(|e| (e.value.as_str(), e.id)),
    )?;
    let location_ids = index(
        locations.attribute.column(),
        locations.entries.iter().map(|e| (e.value.as_str(), e.id)),
    )?;

    let facts = rows
        .iter()
        .map(|row| -> Result<FactRow> {
            Ok(FactRow {
                transaction_id: row.transaction_id.clone(),
                transaction_date: row.transaction_date,
                item_id: lookup(
                    "item",
                    &item_ids,
                    &(row.item.as_str(), price_key(row.price_per_unit)),
                )?,
                payment_method_id: lookup(
                    payment_methods.attribute.column(),
                    &payment_ids,
                    &row.payment_method.as_str(),
                )?,
                location_id: lookup(
                    locations.attribute.column(),
                    &location_ids,
                    &row.location.as_str(),
                )?,
                quantity: row.quantity,
                total_spent: row.total_spent,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!(facts = facts.len(), "assembled fact table");
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{build_dimension, build_item_dimension, Attribute};
    use crate::models::{DimensionEntry, UNKNOWN};
    use chrono::NaiveDate;

    fn row(id: &str, item: &str, price: f64, payment: &str, location: &str) -> CleanRow {
        CleanRow {
            transaction_id: id.to_string(),
            item: item.to_string(),
            quantity: 2.0,
            price_per_unit: price,
            total_spent: 2.0 * price,
            payment_method: payment.to_string(),
            location: location.to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn sample() -> Vec<CleanRow> {
        vec![
            row("T1", "Tea", 3.0, "Cash", "In-store"),
            row("T2", "Tea", 3.5, UNKNOWN, "Takeaway"),
            row("T3", "Coffee", 2.0, "Card", UNKNOWN),
        ]
    }

    #[test]
    fn test_every_row_gets_one_fact() {
        let rows = sample();
        let items = build_item_dimension(&rows);
        let payments = build_dimension(&rows, Attribute::PaymentMethod);
        let locations = build_dimension(&rows, Attribute::Location);
        let facts = assemble_facts(&rows, &items, &payments, &locations).unwrap();

        assert_eq!(facts.len(), rows.len());
        for (fact, row) in facts.iter().zip(&rows) {
            assert_eq!(fact.transaction_id, row.transaction_id);
            let item = items.iter().find(|e| e.item_id == fact.item_id).unwrap();
            assert_eq!((item.item.as_str(), item.price_per_unit), (row.item.as_str(), row.price_per_unit));
            let pm = payments.entries.iter().find(|e| e.id == fact.payment_method_id).unwrap();
            assert_eq!(pm.value, row.payment_method);
            let loc = locations.entries.iter().find(|e| e.id == fact.location_id).unwrap();
            assert_eq!(loc.value, row.location);
            assert_eq!(fact.quantity, row.quantity);
            assert_eq!(fact.total_spent, row.total_spent);
        }
    }

    #[test]
    fn test_tea_prices_join_to_distinct_items() {
        let rows = sample();
        let items = build_item_dimension(&rows);
        let payments = build_dimension(&rows, Attribute::PaymentMethod);
        let locations = build_dimension(&rows, Attribute::Location);
        let facts = assemble_facts(&rows, &items, &payments, &locations).unwrap();
        assert_ne!(facts[0].item_id, facts[1].item_id);
    }

    #[test]
    fn test_signed_zero_price_joins_same_item() {
        let rows = vec![
            row("T1", "Water", 0.0, "Cash", "In-store"),
            row("T2", "Water", -0.0, "Cash", "In-store"),
        ];
        let items = build_item_dimension(&rows);
        let payments = build_dimension(&rows, Attribute::PaymentMethod);
        let locations = build_dimension(&rows, Attribute::Location);
        let facts = assemble_facts(&rows, &items, &payments, &locations).unwrap();
        assert_eq!(facts[0].item_id, facts[1].item_id);
    }

    #[test]
    fn test_join_miss_is_an_error() {
        let rows = sample();
        let items = build_item_dimension(&rows[..1]);
        let payments = build_dimension(&rows, Attribute::PaymentMethod);
        let locations = build_dimension(&rows, Attribute::Location);
        let err = assemble_facts(&rows, &items, &payments, &locations).unwrap_err();
        assert!(matches!(err, EtlError::JoinMiss { dimension: "item", .. }));
    }

    #[test]
    fn test_duplicate_dimension_key_is_an_error() {
        let rows = sample();
        let items = build_item_dimension(&rows);
        let mut payments = build_dimension(&rows, Attribute::PaymentMethod);
        payments.entries.push(DimensionEntry {
            id: 99,
            value: "Cash".to_string(),
        });
        let locations = build_dimension(&rows, Attribute::Location);
        let err = assemble_facts(&rows, &items, &payments, &locations).unwrap_err();
        assert!(matches!(
            err,
            EtlError::AmbiguousJoin { dimension: "payment_method", .. }
        ));
    }
}
