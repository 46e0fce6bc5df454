use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{EtlError, Result};
use crate::loader::OutputPaths;
use crate::pipeline::PipelineOutput;

/// Record of one completed run, written next to its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub stamp: String,
    pub input_file: String,
    pub input_sha256: String,
    pub input_rows: usize,
    pub dropped_rows: usize,
    pub accepted_rows: usize,
    pub rejected_rows: usize,
    pub dim_items: usize,
    pub dim_payment_methods: usize,
    pub dim_locations: usize,
    pub outputs: Vec<String>,
}

impl RunManifest {
    pub fn new(stamp: &str, input: &Path, checksum: String, paths: &OutputPaths, out: &PipelineOutput) -> Self {
        Self {
            stamp: stamp.to_string(),
            input_file: input.display().to_string(),
            input_sha256: checksum,
            input_rows: out.input_rows,
            dropped_rows: out.dropped,
            accepted_rows: out.accepted.len(),
            rejected_rows: out.rejected.len(),
            dim_items: out.dim_items.len(),
            dim_payment_methods: out.dim_payment_methods.entries.len(),
            dim_locations: out.dim_locations.entries.len(),
            outputs: paths.all().iter().map(|p| p.display().to_string()).collect(),
        }
    }
}

pub fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn manifests_dir(target_dir: &Path) -> PathBuf {
    target_dir.join("manifests")
}

pub fn write_manifest(target_dir: &Path, manifest: &RunManifest) -> Result<PathBuf> {
    let dir = manifests_dir(target_dir);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("run_{}.json", manifest.stamp));
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, format!("{json}\n"))?;
    Ok(path)
}

/// Newest manifest by stamp. Stamps sort chronologically as plain strings.
pub fn latest_manifest(target_dir: &Path) -> Result<RunManifest> {
    let dir = manifests_dir(target_dir);
    let no_runs = || EtlError::NoRuns(target_dir.display().to_string());
    if !dir.is_dir() {
        return Err(no_runs());
    }
    let mut newest: Option<PathBuf> = None;
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        let is_manifest = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with("run_") && n.ends_with(".json"))
            .unwrap_or(false);
        if is_manifest && newest.as_ref().map_or(true, |n| path > *n) {
            newest = Some(path);
        }
    }
    let path = newest.ok_or_else(no_runs)?;
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
