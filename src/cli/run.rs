use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::extract::read_source;
use crate::loader::{run_stamp, write_outputs, OutputPaths};
use crate::manifest::{compute_checksum, write_manifest, RunManifest};
use crate::pipeline::transform;
use crate::settings::load_settings;

pub fn run(input: Option<String>, target_dir: Option<String>) -> Result<()> {
    let stamp = run_stamp(chrono::Local::now());
    let settings = load_settings();
    let input = PathBuf::from(input.unwrap_or(settings.input_file));
    let target_dir = PathBuf::from(target_dir.unwrap_or(settings.target_dir));

    let raw_rows = read_source(&input)?;
    let output = transform(&raw_rows)?;

    let paths = OutputPaths::new(&target_dir, &stamp);
    write_outputs(&paths, &output)?;

    let manifest = RunManifest::new(&stamp, &input, compute_checksum(&input)?, &paths, &output);
    let manifest_path = write_manifest(&target_dir, &manifest)?;
    info!(path = %manifest_path.display(), "wrote run manifest");

    println!("ETL pipeline finished successfully.");
    println!("- Clean data: {} rows", output.accepted.len());
    println!("- Rejected data: {} rows", output.rejected.len());
    Ok(())
}
