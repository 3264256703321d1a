//! Error types for bandlu-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("leading dimension {ldab} is smaller than the {required} rows the band needs")]
    LeadingDimension { ldab: usize, required: usize },

    #[error("buffer too short: expected at least {expected} elements, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("size overflow computing {0}")]
    SizeOverflow(&'static str),

    #[error("failed to allocate scratch buffer of {elements} elements")]
    Allocation { elements: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
