//! Error types for bandlu-verify.

use std::path::PathBuf;

use thiserror::Error;

use crate::pivots::InvalidPivot;

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures of a verification call.
///
/// A factorization that is merely wrong is not an error: it produces a large
/// residual or a skipped check. These variants mean the check itself could
/// not be carried out.
#[derive(Debug, Error)]
pub enum Error {
    /// Band layout, dimension or allocation failure.
    #[error(transparent)]
    Layout(#[from] bandlu_core::Error),

    /// Pivot sequence has the wrong length.
    #[error("pivot sequence has {actual} entries, expected {expected}")]
    PivotLength { expected: usize, actual: usize },

    /// The residual was requested for an out-of-range pivot sequence.
    #[error("cannot evaluate residual: {0}")]
    InvalidPivot(InvalidPivot),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report could not be written.
    #[error("failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
