//! Custom error types for the orbitrisk engine.
//!
//! Provides a structured error hierarchy for better error handling
//! and more informative error messages. Everything here is locally
//! recoverable; the engine never aborts on its own errors.

use std::path::PathBuf;

/// The main error type for orbitrisk operations.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    /// I/O error (file read/write, permissions, etc.)
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A criterion score outside the 1..=5 range was presented for storage
    #[error("Invalid criterion score {value}: scores must be in 1..=5")]
    InvalidScore { value: u8 },

    /// A criterion index outside the assessment context's table
    #[error("Criterion index {index} out of range for this assessment context")]
    InvalidCriterion { index: usize },

    /// An asset ordinal outside the loaded catalog
    #[error("Asset ordinal {index} not present in the catalog")]
    UnknownAsset { index: usize },

    /// A threat ordinal outside the loaded catalog
    #[error("Threat ordinal {index} not present in the catalog")]
    UnknownThreat { index: usize },

    /// A control id absent from the control catalog
    #[error("Control '{id}' not present in the catalog")]
    UnknownControl { id: String },

    /// `apply_control` called for a control that is already in effect
    #[error("Control '{id}' is already applied")]
    DuplicateApply { id: String },

    /// `remove_control` called for a control that is not in effect
    #[error("Control '{id}' is not applied")]
    NotApplied { id: String },
}

/// Result type alias using RiskError
pub type RiskResult<T> = Result<T, RiskError>;

impl RiskError {
    /// Create an I/O error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convert from raw I/O errors (without path context)
impl From<std::io::Error> for RiskError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}
