//! Pivot sequence validation.
//!
//! Pivot entries are 1-based row indices as written by the factorization.
//! A value outside `[1, m]` means the factorization is corrupt; using it to
//! index a row would read out of bounds, so it is caught before any
//! densification happens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// First out-of-range entry of a pivot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidPivot {
    /// Position in the sequence (0-based).
    pub index: usize,
    /// The offending 1-based row index.
    pub value: i32,
}

impl fmt::Display for InvalidPivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ipiv @ {} = {}", self.index, self.value)
    }
}

/// Check every pivot lies in `[1, m]`, stopping at the first that does not.
pub fn validate_pivots(ipiv: &[i32], m: usize) -> Result<(), InvalidPivot> {
    for (index, &value) in ipiv.iter().enumerate() {
        let in_range = value >= 1 && (value as i64) <= m as i64;
        if !in_range {
            return Err(InvalidPivot { index, value });
        }
    }
    Ok(())
}

/// 0-based row index of a validated pivot entry.
#[inline]
pub(crate) fn pivot_row(value: i32) -> usize {
    (value - 1) as usize
}
