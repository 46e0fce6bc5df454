use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{EtlError, Result};
use crate::fmt::format_bytes;
use crate::manifest::latest_manifest;
use crate::settings::load_settings;

pub fn run(target_dir: Option<String>) -> Result<()> {
    let target_dir = PathBuf::from(target_dir.unwrap_or_else(|| load_settings().target_dir));

    let manifest = match latest_manifest(&target_dir) {
        Ok(m) => m,
        Err(EtlError::NoRuns(dir)) => {
            println!("No runs found in {dir}. Run `cafe-etl run` first.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("{}", format!("Last run: {}", manifest.stamp).bold());
    println!("Input:      {}", manifest.input_file);
    println!("SHA-256:    {}", manifest.input_sha256);
    println!();
    println!("Input rows:     {}", manifest.input_rows);
    println!("Dropped (no id): {}", manifest.dropped_rows);
    println!("Accepted:       {}", manifest.accepted_rows.to_string().green());
    println!("Rejected:       {}", manifest.rejected_rows.to_string().red());
    println!(
        "Dimensions:     {} items, {} payment methods, {} locations",
        manifest.dim_items, manifest.dim_payment_methods, manifest.dim_locations
    );

    let mut table = Table::new();
    table.set_header(vec!["Output", "Size"]);
    for output in &manifest.outputs {
        let size = std::fs::metadata(output)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "(missing)".to_string());
        table.add_row(vec![Cell::new(output), Cell::new(size)]);
    }
    println!("\n{table}");
    Ok(())
}
