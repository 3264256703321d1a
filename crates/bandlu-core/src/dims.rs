//! Shape of a banded matrix and its compact storage.
//!
//! # Storage layout
//!
//! Band storage is column-major with `ldab` rows per column. Logical entry
//! `(i, j)` lives at band row `kv + i - j` of column `j`, where
//! `kv = kl + ku`. An unfactored matrix therefore occupies band rows
//! `kl..=kl + kv`; the first `kl` rows are padding that the factorization
//! fills with the extra superdiagonals created by row interchanges.
//!
//! ```text
//!   ldab >= 2*kl + ku + 1
//!   +-----------+
//!   |  padding  |  kl rows   (fill-in, factored form only)
//!   +-----------+
//!   |   upper   |  ku rows
//!   | diagonal  |  1 row
//!   |   lower   |  kl rows
//!   +-----------+
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dimensions and bandwidths of an M×N banded matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandDims {
    /// Number of rows.
    pub m: usize,
    /// Number of columns.
    pub n: usize,
    /// Number of subdiagonals.
    pub kl: usize,
    /// Number of superdiagonals.
    pub ku: usize,
}

impl BandDims {
    pub fn new(m: usize, n: usize, kl: usize, ku: usize) -> Self {
        Self { m, n, kl, ku }
    }

    pub fn square(n: usize, kl: usize, ku: usize) -> Self {
        Self::new(n, n, kl, ku)
    }

    /// Superdiagonals of the factored form (`kl + ku`).
    #[inline]
    pub fn kv(&self) -> usize {
        self.kl + self.ku
    }

    /// Length of the pivot sequence.
    #[inline]
    pub fn min_mn(&self) -> usize {
        self.m.min(self.n)
    }

    /// Rows a band buffer needs per column (`2*kl + ku + 1`).
    #[inline]
    pub fn band_rows(&self) -> usize {
        self.kl + 1 + self.kv()
    }

    /// Number of elements of an `ldab`-pitched band buffer.
    pub fn band_len(&self, ldab: usize) -> Result<usize> {
        ldab.checked_mul(self.n)
            .ok_or(Error::SizeOverflow("band buffer length"))
    }

    /// Number of elements of the dense M×N matrix.
    pub fn dense_len(&self) -> Result<usize> {
        self.m
            .checked_mul(self.n)
            .ok_or(Error::SizeOverflow("dense matrix length"))
    }

    /// Check that `len` elements at leading dimension `ldab` hold the band.
    pub fn check_band(&self, len: usize, ldab: usize) -> Result<()> {
        let required = self.band_rows();
        if ldab < required {
            return Err(Error::LeadingDimension { ldab, required });
        }
        let expected = self.band_len(ldab)?;
        if len < expected {
            return Err(Error::BufferTooShort {
                expected,
                actual: len,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for BandDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} (kl={}, ku={})", self.m, self.n, self.kl, self.ku)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_rows_includes_fill_in_padding() {
        let dims = BandDims::square(8, 2, 3);
        assert_eq!(dims.kv(), 5);
        assert_eq!(dims.band_rows(), 8);
    }

    #[test]
    fn min_mn_rectangular() {
        assert_eq!(BandDims::new(5, 9, 1, 1).min_mn(), 5);
        assert_eq!(BandDims::new(9, 5, 1, 1).min_mn(), 5);
    }

    #[test]
    fn check_band_rejects_short_pitch() {
        let dims = BandDims::square(4, 1, 1);
        let result = dims.check_band(100, 3);
        assert!(matches!(
            result,
            Err(Error::LeadingDimension {
                ldab: 3,
                required: 4
            })
        ));
    }

    #[test]
    fn check_band_rejects_short_buffer() {
        let dims = BandDims::square(4, 1, 1);
        let result = dims.check_band(15, 4);
        assert!(matches!(
            result,
            Err(Error::BufferTooShort {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn dense_len_overflow() {
        let dims = BandDims::new(usize::MAX, 2, 0, 0);
        assert!(matches!(dims.dense_len(), Err(Error::SizeOverflow(_))));
    }

    #[test]
    fn display() {
        assert_eq!(BandDims::new(3, 4, 1, 2).to_string(), "3x4 (kl=1, ku=2)");
    }
}
