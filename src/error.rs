use std::path::PathBuf;

use thiserror::Error;

/// Failures of LMS resolution and z-score / centile conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CentileError {
    #[error("covariate {covariate} is outside the reference range [{min}, {max}]")]
    OutOfRange { covariate: f64, min: f64, max: f64 },
    #[error("bounding rows share covariate {at}; cannot interpolate {covariate}")]
    DegenerateInterval { covariate: f64, at: f64 },
    #[error("invalid reference model: {0}")]
    InvalidModel(String),
    #[error("invalid measurement {0}: value must be finite and positive")]
    InvalidMeasurement(f64),
    #[error("invalid probability {0}: must lie strictly between 0 and 1")]
    InvalidProbability(f64),
}

impl CentileError {
    /// Stable snake_case label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            CentileError::OutOfRange { .. } => "out_of_range",
            CentileError::DegenerateInterval { .. } => "degenerate_interval",
            CentileError::InvalidModel(_) => "invalid_model",
            CentileError::InvalidMeasurement(_) => "invalid_measurement",
            CentileError::InvalidProbability(_) => "invalid_probability",
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("reference table has no rows")]
    Empty,
    #[error("non-finite value in row at line {line}")]
    NonFinite { line: usize },
    #[error("covariate decreases at line {line}; rows must be sorted ascending")]
    Unsorted { line: usize },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("measurement file is empty")]
    EmptyInput,
    #[error("missing column: {0}")]
    MissingColumn(&'static str),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}: {source}", .path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: TableError,
    },
    #[error(transparent)]
    Centile(#[from] CentileError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
