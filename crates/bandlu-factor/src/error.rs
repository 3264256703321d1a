//! Error types for bandlu-factor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] bandlu_core::Error),

    #[error("pivot buffer too short: expected at least {expected} entries, got {actual}")]
    PivotBuffer { expected: usize, actual: usize },

    #[error("status buffer too short: expected at least {expected} entries, got {actual}")]
    StatusBuffer { expected: usize, actual: usize },

    #[error("invalid batch stride: {0}")]
    InvalidStride(String),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
