use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EtlError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_input_file")]
    pub input_file: String,
    #[serde(default = "default_target_dir")]
    pub target_dir: String,
}

fn default_input_file() -> String {
    "data/dirty_cafe_sales.csv".to_string()
}

fn default_target_dir() -> String {
    "target".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            target_dir: default_target_dir(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("cafe-etl")
}

fn settings_path(dir: &Path) -> PathBuf {
    dir.join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&config_dir())
}

/// A missing or unreadable file yields the defaults.
pub fn load_settings_from(dir: &Path) -> Settings {
    let path = settings_path(dir);
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<PathBuf> {
    save_settings_in(&config_dir(), settings)
}

pub fn save_settings_in(dir: &Path, settings: &Settings) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| EtlError::Settings(e.to_string()))?;
    let path = settings_path(dir);
    std::fs::write(&path, format!("{json}\n"))?;
    Ok(path)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
