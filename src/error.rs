use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading artifacts or running a render pass.
///
/// Loading errors (`Io`, `Csv`, `MissingColumn`, `InvalidNumber`,
/// `ModelDecode`, `ModelJson`, `InvalidModel`) are fatal at startup.
/// `SchemaMismatch` aborts the current render only.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("column `{column}` row {row}: `{value}` is not a number")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("failed to decode model artifact: {0}")]
    ModelDecode(#[from] bincode::Error),

    #[error("failed to parse model artifact: {0}")]
    ModelJson(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("feature schema mismatch: model expects {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("failed to render chart: {0}")]
    Plot(String),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

impl DashboardError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DashboardError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
