use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while bootstrapping reference data or driving a batch.
///
/// Per-URL extraction and scoring never produce these; they fall back to
/// default outputs instead.
#[derive(Error, Debug)]
pub enum PhishError {
    #[error("reference file `{name}` not found: {}", .path.display())]
    MissingFile { name: &'static str, path: PathBuf },

    #[error("reference file `{name}` produced no usable entries: {}", .path.display())]
    EmptyReference { name: &'static str, path: PathBuf },

    #[error("column `{column}` missing from {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("column order mismatch: expected {expected:?}, observed {observed:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        observed: Vec<String>,
    },

    #[error("public suffix list error: {0}")]
    SuffixList(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PhishError>;
