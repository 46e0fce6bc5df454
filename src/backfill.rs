use std::collections::HashMap;

use tracing::info;

use crate::models::{CanonicalRow, UNKNOWN};

/// Item name to the first known unit price seen for it.
pub type PriceMap = HashMap<String, f64>;

pub fn build_price_map(rows: &[CanonicalRow]) -> PriceMap {
    rows.iter()
        .filter(|r| r.item != UNKNOWN)
        .fold(PriceMap::new(), |mut map, r| {
            if let Some(price) = r.price_per_unit {
                map.entry(r.item.clone()).or_insert(price);
            }
            map
        })
}

pub struct BackfillResult {
    pub rows: Vec<CanonicalRow>,
    pub filled: usize,
}

/// Fill missing unit prices from the map. Present prices are never replaced.
pub fn backfill_prices(mut rows: Vec<CanonicalRow>, prices: &PriceMap) -> BackfillResult {
    let mut filled = 0usize;
    for row in rows.iter_mut().filter(|r| r.price_per_unit.is_none()) {
        if let Some(&price) = prices.get(&row.item) {
            row.price_per_unit = Some(price);
            filled += 1;
        }
    }
    info!(items = prices.len(), filled, "backfilled unit prices");
    BackfillResult { rows, filled }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, item: &str, price: Option<f64>) -> CanonicalRow {
        CanonicalRow {
            transaction_id: id.to_string(),
            item: item.to_string(),
            quantity: None,
            price_per_unit: price,
            total_spent: None,
            payment_method: "Cash".to_string(),
            location: "In-store".to_string(),
            transaction_date: None,
        }
    }

    #[test]
    fn test_first_seen_price_wins() {
        let rows = vec![
            row("1", "Tea", None),
            row("2", "Tea", Some(3.0)),
            row("3", "Tea", Some(3.5)),
            row("4", "Cake", Some(4.5)),
        ];
        let map = build_price_map(&rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map["Tea"], 3.0);
        assert_eq!(map["Cake"], 4.5);
    }

    #[test]
    fn test_unknown_item_excluded_from_map() {
        let map = build_price_map(&[row("1", UNKNOWN, Some(2.0))]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_backfill_fills_only_missing() {
        let rows = vec![
            row("1", "Tea", Some(3.0)),
            row("2", "Tea", None),
            row("3", "Tea", Some(3.5)),
            row("4", UNKNOWN, None),
            row("5", "Juice", None),
        ];
        let map = build_price_map(&rows);
        let result = backfill_prices(rows, &map);
        assert_eq!(result.filled, 1);
        assert_eq!(result.rows[1].price_per_unit, Some(3.0));
        assert_eq!(result.rows[2].price_per_unit, Some(3.5));
        assert_eq!(result.rows[3].price_per_unit, None);
        assert_eq!(result.rows[4].price_per_unit, None);
    }
}
