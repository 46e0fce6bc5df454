use tracing::info;

use crate::backfill::{backfill_prices, build_price_map};
use crate::dimensions::{build_dimension, build_item_dimension, Attribute, Dimension};
use crate::error::Result;
use crate::facts::assemble_facts;
use crate::models::{CanonicalRow, CleanRow, FactRow, ItemEntry, RawRow};
use crate::normalizer::normalize_rows;
use crate::quality_gate::partition;
use crate::reconciler::recalculate_missing_values;

/// Everything one batch run produces, plus the counts the summary reports.
pub struct PipelineOutput {
    pub input_rows: usize,
    pub dropped: usize,
    pub accepted: Vec<CleanRow>,
    pub rejected: Vec<CanonicalRow>,
    pub dim_items: Vec<ItemEntry>,
    pub dim_payment_methods: Dimension,
    pub dim_locations: Dimension,
    pub facts: Vec<FactRow>,
}

pub fn transform(raw_rows: &[RawRow]) -> Result<PipelineOutput> {
    let normalized = normalize_rows(raw_rows);
    let first_pass = recalculate_missing_values(normalized.rows);

    let prices = build_price_map(&first_pass.rows);
    let backfilled = backfill_prices(first_pass.rows, &prices);
    let second_pass = recalculate_missing_values(backfilled.rows);

    let gate = partition(second_pass.rows);

    let dim_items = build_item_dimension(&gate.accepted);
    let dim_payment_methods = build_dimension(&gate.accepted, Attribute::PaymentMethod);
    let dim_locations = build_dimension(&gate.accepted, Attribute::Location);
    let facts = assemble_facts(&gate.accepted, &dim_items, &dim_payment_methods, &dim_locations)?;

    info!(
        input = raw_rows.len(),
        dropped = normalized.dropped,
        recovered = first_pass.recovered + second_pass.recovered,
        backfilled = backfilled.filled,
        accepted = gate.accepted.len(),
        rejected = gate.rejected.len(),
        "transform complete"
    );

    Ok(PipelineOutput {
        input_rows: raw_rows.len(),
        dropped: normalized.dropped,
        accepted: gate.accepted,
        rejected: gate.rejected,
        dim_items,
        dim_payment_methods,
        dim_locations,
        facts,
    })
}
