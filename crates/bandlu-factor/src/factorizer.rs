//! The factorization seam.
//!
//! A [`BandLuFactorizer`] overwrites a band buffer with its packed LU factors
//! and writes the pivot sequence, the way LAPACK's `gbtrf` does. Backends only
//! have to provide the single-matrix `factor`; the strided batch entry point
//! has a sequential default that backends may override.
//!
//! # Status codes
//!
//! `factor` returns `0` on success or `k > 0` when `U(k, k)` (1-based) is
//! exactly zero. The factorization still completes in that case, but the
//! factors cannot be used to solve. Malformed arguments are reported as
//! [`Error`](crate::Error) instead of negative status codes.

use bandlu_core::{BandDims, BandScalar};

use crate::backend::BackendType;
use crate::error::{Error, Result};

/// A routine that factors banded matrices in place.
pub trait BandLuFactorizer<T: BandScalar>: Send + Sync {
    /// Factor one `ldab`-pitched band matrix in place.
    ///
    /// `ipiv` receives `min(m, n)` 1-based row indices.
    fn factor(
        &self,
        dims: &BandDims,
        ab: &mut [T],
        ldab: usize,
        ipiv: &mut [i32],
    ) -> Result<i32>;

    /// Factor `batch_count` matrices stored `stride_a` elements apart.
    ///
    /// Pivot sequences are stored `stride_piv` entries apart and each
    /// member's status goes to `info[k]`.
    #[allow(clippy::too_many_arguments)]
    fn factor_batched_strided(
        &self,
        dims: &BandDims,
        ab: &mut [T],
        ldab: usize,
        stride_a: usize,
        ipiv: &mut [i32],
        stride_piv: usize,
        info: &mut [i32],
        batch_count: usize,
    ) -> Result<()> {
        let layout = BatchLayout::new(dims, ldab, stride_a, stride_piv, batch_count);
        layout.validate(ab.len(), ipiv.len(), info.len())?;

        for (k, status) in info.iter_mut().take(batch_count).enumerate() {
            let a = &mut ab[k * stride_a..k * stride_a + layout.matrix_len];
            let p = &mut ipiv[k * stride_piv..k * stride_piv + layout.pivot_len];
            *status = self.factor(dims, a, ldab, p)?;
        }
        Ok(())
    }

    /// Which backend this is.
    fn backend_type(&self) -> BackendType;
}

/// Sizes of one member of a strided batch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BatchLayout {
    pub(crate) matrix_len: usize,
    pub(crate) pivot_len: usize,
    stride_a: usize,
    stride_piv: usize,
    batch_count: usize,
    ldab: usize,
    band_rows: usize,
}

impl BatchLayout {
    pub(crate) fn new(
        dims: &BandDims,
        ldab: usize,
        stride_a: usize,
        stride_piv: usize,
        batch_count: usize,
    ) -> Self {
        Self {
            matrix_len: ldab.saturating_mul(dims.n),
            pivot_len: dims.min_mn(),
            stride_a,
            stride_piv,
            batch_count,
            ldab,
            band_rows: dims.band_rows(),
        }
    }

    /// Check every member fits in the given buffers.
    pub(crate) fn validate(&self, ab_len: usize, ipiv_len: usize, info_len: usize) -> Result<()> {
        if self.ldab < self.band_rows {
            return Err(bandlu_core::Error::LeadingDimension {
                ldab: self.ldab,
                required: self.band_rows,
            }
            .into());
        }
        if self.batch_count == 0 {
            return Ok(());
        }
        if self.batch_count > 1 && self.stride_a < self.matrix_len {
            return Err(Error::InvalidStride(format!(
                "matrix stride {} is smaller than one matrix ({} elements)",
                self.stride_a, self.matrix_len
            )));
        }
        if self.batch_count > 1 && self.stride_piv < self.pivot_len {
            return Err(Error::InvalidStride(format!(
                "pivot stride {} is smaller than one pivot sequence ({} entries)",
                self.stride_piv, self.pivot_len
            )));
        }

        let last = self.batch_count - 1;
        let ab_needed = last * self.stride_a + self.matrix_len;
        if ab_len < ab_needed {
            return Err(bandlu_core::Error::BufferTooShort {
                expected: ab_needed,
                actual: ab_len,
            }
            .into());
        }
        let piv_needed = last * self.stride_piv + self.pivot_len;
        if ipiv_len < piv_needed {
            return Err(Error::PivotBuffer {
                expected: piv_needed,
                actual: ipiv_len,
            });
        }
        if info_len < self.batch_count {
            return Err(Error::StatusBuffer {
                expected: self.batch_count,
                actual: info_len,
            });
        }
        Ok(())
    }
}
