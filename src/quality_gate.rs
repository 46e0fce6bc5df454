use tracing::info;

use crate::models::{CanonicalRow, CleanRow};

pub struct GateResult {
    pub accepted: Vec<CleanRow>,
    pub rejected: Vec<CanonicalRow>,
}

/// Promote a row whose measures and date are all present; hand it back otherwise.
fn accept(row: CanonicalRow) -> std::result::Result<CleanRow, CanonicalRow> {
    match (row.quantity, row.price_per_unit, row.total_spent, row.transaction_date) {
        (Some(quantity), Some(price_per_unit), Some(total_spent), Some(transaction_date)) => {
            Ok(CleanRow {
                transaction_id: row.transaction_id,
                item: row.item,
                quantity,
                price_per_unit,
                total_spent,
                payment_method: row.payment_method,
                location: row.location,
                transaction_date,
            })
        }
        _ => Err(row),
    }
}

pub fn partition(rows: Vec<CanonicalRow>) -> GateResult {
    let mut accepted = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();
    for row in rows {
        match accept(row) {
            Ok(clean) => accepted.push(clean),
            Err(row) => rejected.push(row),
        }
    }
    info!(accepted = accepted.len(), rejected = rejected.len(), "quality gate");
    GateResult { accepted, rejected }
}
