//! Band-to-dense conversion.
//!
//! Two layouts share the same storage rule (entry `(i, j)` at band row
//! `kv + i - j`) but differ in which rows hold meaningful data:
//!
//! - An **original** matrix has `ku` superdiagonals. Column `j` holds rows
//!   `max(0, j-ku)..=min(j+kl, m-1)` starting at band row `kl + max(ku-j, 0)`.
//! - A **factored** matrix has `kv = kl + ku` superdiagonals because row
//!   interchanges push U up to `kl` rows further above the diagonal. Column
//!   `j` holds rows `max(0, j-kv)..=min(j+kl, m-1)` starting at band row
//!   `max(kv-j, 0)`.
//!
//! The offsets are not interchangeable, so each layout has its own function.

use nalgebra::DMatrix;

use crate::dense;
use crate::dims::BandDims;
use crate::error::Result;
use crate::scalar::BandScalar;

/// Expand an unfactored band matrix into a dense M×N matrix.
///
/// Out-of-band entries are zero. The input buffer is not modified.
///
/// # Errors
/// Returns an error if `ldab` is below [`BandDims::band_rows`], if `ab` is
/// shorter than `ldab * n`, or if the dense buffer cannot be allocated.
pub fn original_band_to_dense<T: BandScalar>(
    dims: &BandDims,
    ab: &[T],
    ldab: usize,
) -> Result<DMatrix<T>> {
    let (kl, ku) = (dims.kl, dims.ku);
    copy_band_columns(dims, ab, ldab, |j| {
        (j.saturating_sub(ku), kl + ku.saturating_sub(j))
    })
}

/// Expand a factored band matrix (packed L and U) into a dense M×N matrix.
///
/// The result holds U in and above the diagonal and the unpermuted
/// multipliers of L below it.
///
/// # Errors
/// Same conditions as [`original_band_to_dense`].
pub fn factored_band_to_dense<T: BandScalar>(
    dims: &BandDims,
    lub: &[T],
    ldab: usize,
) -> Result<DMatrix<T>> {
    let kv = dims.kv();
    copy_band_columns(dims, lub, ldab, |j| {
        (j.saturating_sub(kv), kv.saturating_sub(j))
    })
}

/// Copy each column's in-band segment.
///
/// `first_row(j)` returns the first logical row held by column `j` and the
/// band row it is stored at. The last row is always `min(j + kl, m - 1)`.
fn copy_band_columns<T, F>(
    dims: &BandDims,
    band: &[T],
    ldab: usize,
    first_row: F,
) -> Result<DMatrix<T>>
where
    T: BandScalar,
    F: Fn(usize) -> (usize, usize),
{
    dims.check_band(band.len(), ldab)?;

    let m = dims.m;
    let mut out = dense::zeros::<T>(m, dims.n)?;
    let dst = out.as_mut_slice();

    for j in 0..dims.n {
        let (row_start, band_start) = first_row(j);
        let row_end = (j + dims.kl + 1).min(m);
        if row_start >= row_end {
            continue;
        }
        let len = row_end - row_start;
        let src = j * ldab + band_start;
        let at = j * m + row_start;
        dst[at..at + len].copy_from_slice(&band[src..src + len]);
    }

    Ok(out)
}
