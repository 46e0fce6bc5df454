use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No {dimension} dimension entry for {key}")]
    JoinMiss { dimension: &'static str, key: String },

    #[error("Several {dimension} dimension entries for {key}")]
    AmbiguousJoin { dimension: &'static str, key: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("No runs found in {0}")]
    NoRuns(String),
}

pub type Result<T> = std::result::Result<T, EtlError>;
