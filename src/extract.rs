use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{EtlError, Result};
use crate::models::{RawRow, REQUIRED_COLUMNS};
use crate::normalizer::clean_column_name;

/// Position of each required column in the source header.
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let cleaned: Vec<String> = headers.iter().map(clean_column_name).collect();
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match cleaned.iter().position(|h| h == name) {
                Some(pos) => *slot = pos,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(EtlError::MissingColumns(missing));
        }
        Ok(Self(positions))
    }

    fn row(&self, record: &csv::StringRecord) -> RawRow {
        let cell = |i: usize| record.get(self.0[i]).unwrap_or("").to_string();
        RawRow {
            transaction_id: cell(0),
            item: cell(1),
            quantity: cell(2),
            price_per_unit: cell(3),
            total_spent: cell(4),
            payment_method: cell(5),
            location: cell(6),
            transaction_date: cell(7),
        }
    }
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let index = ColumnIndex::from_headers(rdr.headers()?)?;
    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(index.row(&result?));
    }
    Ok(rows)
}

pub fn read_source(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let rows = read_rows(std::io::BufReader::new(file))?;
    info!(path = %path.display(), rows = rows.len(), "read source file");
    Ok(rows)
}
