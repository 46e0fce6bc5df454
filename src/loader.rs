use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::dimensions::Dimension;
use crate::error::Result;
use crate::fmt::{date_cell, float_cell, opt_date_cell, opt_float_cell};
use crate::models::{CanonicalRow, FactRow, ItemEntry, REQUIRED_COLUMNS};
use crate::pipeline::PipelineOutput;

/// Stamp shared by every file one run writes.
pub fn run_stamp(started: DateTime<Local>) -> String {
    started.format("%Y-%m-%d%H%M%S").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub rejected: PathBuf,
    pub dim_items: PathBuf,
    pub dim_payment_methods: PathBuf,
    pub dim_locations: PathBuf,
    pub fact_transactions: PathBuf,
}

impl OutputPaths {
    pub fn new(target_dir: &Path, stamp: &str) -> Self {
        let accepted = target_dir.join("accepted");
        Self {
            rejected: target_dir.join("reject").join(format!("data_rejected_{stamp}.csv")),
            dim_items: accepted.join(format!("dim_items_{stamp}.csv")),
            dim_payment_methods: accepted.join(format!("dim_payment_methods_{stamp}.csv")),
            dim_locations: accepted.join(format!("dim_locations_{stamp}.csv")),
            fact_transactions: accepted.join(format!("fact_transactions_{stamp}.csv")),
        }
    }

    pub fn all(&self) -> [&Path; 5] {
        [
            self.rejected.as_path(),
            self.dim_items.as_path(),
            self.dim_payment_methods.as_path(),
            self.dim_locations.as_path(),
            self.fact_transactions.as_path(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

pub fn write_rejected<W: Write>(out: W, rows: &[CanonicalRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(REQUIRED_COLUMNS)?;
    for r in rows {
        wtr.write_record([
            r.transaction_id.clone(),
            r.item.clone(),
            opt_float_cell(r.quantity),
            opt_float_cell(r.price_per_unit),
            opt_float_cell(r.total_spent),
            r.payment_method.clone(),
            r.location.clone(),
            opt_date_cell(r.transaction_date),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_item_dimension<W: Write>(out: W, items: &[ItemEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["item_id", "item", "price_per_unit"])?;
    for e in items {
        wtr.write_record([e.item_id.to_string(), e.item.clone(), float_cell(e.price_per_unit)])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_dimension<W: Write>(out: W, dim: &Dimension) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([dim.attribute.id_column(), dim.attribute.column()])?;
    for e in &dim.entries {
        wtr.write_record([e.id.to_string(), e.value.clone()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_facts<W: Write>(out: W, facts: &[FactRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "transaction_id",
        "transaction_date",
        "item_id",
        "payment_method_id",
        "location_id",
        "quantity",
        "total_spent",
    ])?;
    for f in facts {
        wtr.write_record([
            f.transaction_id.clone(),
            date_cell(f.transaction_date),
            f.item_id.to_string(),
            f.payment_method_id.to_string(),
            f.location_id.to_string(),
            float_cell(f.quantity),
            float_cell(f.total_spent),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<std::io::BufWriter<std::fs::File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::io::BufWriter::new(std::fs::File::create(path)?))
}

pub fn write_outputs(paths: &OutputPaths, output: &PipelineOutput) -> Result<()> {
    write_rejected(create(&paths.rejected)?, &output.rejected)?;
    write_item_dimension(create(&paths.dim_items)?, &output.dim_items)?;
    write_dimension(create(&paths.dim_payment_methods)?, &output.dim_payment_methods)?;
    write_dimension(create(&paths.dim_locations)?, &output.dim_locations)?;
    write_facts(create(&paths.fact_transactions)?, &output.facts)?;
    for path in paths.all() {
        info!(path = %path.display(), "wrote output");
    }
    Ok(())
}
