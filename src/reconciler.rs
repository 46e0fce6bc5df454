use tracing::{debug, info};

use crate::models::CanonicalRow;
use crate::normalizer::{is_missing, is_sentinel};

/// Cast a numeric cell to a float. Sentinels, missing tokens, unparsable
/// text and non-finite values all come back as `None`.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    if is_missing(raw) || is_sentinel(raw) {
        return None;
    }
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(unsigned_zero(v)),
        _ => {
            debug!(value = raw, "numeric cell coerced to missing");
            None
        }
    }
}

/// `-0.0` and `0.0` are the same measure; keep a single spelling.
fn unsigned_zero(val: f64) -> f64 {
    if val == 0.0 {
        0.0
    } else {
        val
    }
}

fn finite(val: f64) -> Option<f64> {
    val.is_finite().then(|| unsigned_zero(val))
}

pub struct ReconcileResult {
    pub rows: Vec<CanonicalRow>,
    /// Number of fields recomputed in this pass.
    pub recovered: usize,
}

/// Recompute one missing measure from the other two. Fields are visited in a
/// fixed order (quantity, price, total) with a single check each; a row missing
/// two or more measures is left as it is.
fn recalculate(row: &mut CanonicalRow) -> usize {
    let mut recovered = 0;

    if row.quantity.is_none() {
        if let (Some(price), Some(total)) = (row.price_per_unit, row.total_spent) {
            row.quantity = finite(total / price);
            recovered += usize::from(row.quantity.is_some());
        }
    }
    if row.price_per_unit.is_none() {
        if let (Some(qty), Some(total)) = (row.quantity, row.total_spent) {
            row.price_per_unit = finite(total / qty);
            recovered += usize::from(row.price_per_unit.is_some());
        }
    }
    if row.total_spent.is_none() {
        if let (Some(qty), Some(price)) = (row.quantity, row.price_per_unit) {
            row.total_spent = finite(qty * price);
            recovered += usize::from(row.total_spent.is_some());
        }
    }

    recovered
}

pub fn recalculate_missing_values(mut rows: Vec<CanonicalRow>) -> ReconcileResult {
    let recovered = rows.iter_mut().map(recalculate).sum();
    info!(recovered, "reconciled numeric fields");
    ReconcileResult { rows, recovered }
}
