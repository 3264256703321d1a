//! Residual of a banded LU factorization.
//!
//! Computes `‖L·U − P·A‖_F / (‖A‖_F · N)` from the original band matrix, the
//! packed factors the factorization wrote over it, and the pivot sequence.
//!
//! # Reconstruction
//!
//! 1. Both band buffers are densified with their own layout.
//! 2. Interchanges are replayed on the stored multipliers. A band
//!    factorization applies the interchange of step `k` to columns
//!    `k..` only, so the multipliers of an earlier column `j` are stored in
//!    the row order they had at step `j`. Applying interchanges
//!    `k = j+1 .. min(m, n)` to column `j` alone puts them in the order of
//!    the final permutation. Columns with no later interchange are left
//!    alone: for a square matrix the final interchange is a self-interchange,
//!    so only columns `0..=n-3` can change, and a single column never does.
//!    A tall matrix can have a real final interchange, which reaches
//!    column `n-2` as well.
//! 3. The whole pivot sequence is applied to the original, giving `P·A`.
//! 4. `L` (unit diagonal) and `U` are cut out of the replayed matrix and
//!    multiplied back together.
//!
//! Every scratch matrix is allocated by the call and dropped before it
//! returns.

use bandlu_core::{BandDims, BandScalar, dense, factored_band_to_dense, original_band_to_dense};
use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::pivots::{pivot_row, validate_pivots};

/// Normalized residual of a band LU factorization.
///
/// `ab`/`ldab` hold the original matrix in band layout, `lub`/`ldlub` the
/// factored matrix, and `ipiv` the `min(m, n)` 1-based pivots.
///
/// # Errors
/// Returns an error for malformed buffers, a pivot sequence of the wrong
/// length or with out-of-range entries, or a failed scratch allocation.
pub fn band_lu_residual<T: BandScalar>(
    dims: &BandDims,
    ab: &[T],
    ldab: usize,
    lub: &[T],
    ldlub: usize,
    ipiv: &[i32],
) -> Result<f64> {
    let min_mn = dims.min_mn();
    if ipiv.len() != min_mn {
        return Err(Error::PivotLength {
            expected: min_mn,
            actual: ipiv.len(),
        });
    }
    validate_pivots(ipiv, dims.m).map_err(Error::InvalidPivot)?;

    let mut a = original_band_to_dense(dims, ab, ldab)?;
    let mut lu = factored_band_to_dense(dims, lub, ldlub)?;
    if dims.m == 0 || dims.n == 0 {
        return Ok(0.0);
    }

    replay_interchanges(&mut lu, ipiv);
    apply_pivots(&mut a, ipiv);

    let l = unit_lower_factor(&lu, min_mn)?;
    let u = upper_factor(&lu, min_mn)?;
    drop(lu);

    let matnorm = a.norm();

    let mut product = dense::zeros::<T>(dims.m, dims.n)?;
    product.gemm(nalgebra::one(), &l, &u, nalgebra::zero());
    product -= &a;
    let residual = product.norm();

    log::debug!(
        "{} residual: ||LU - PA|| = {:e}, ||A|| = {:e}",
        dims,
        residual,
        matnorm
    );

    Ok(normalize(residual, matnorm, dims.n))
}

/// Put stored multipliers in final-permutation row order.
///
/// For each column `j`, interchanges `k > j` are applied to column `j` only.
pub fn replay_interchanges<T: BandScalar>(lu: &mut DMatrix<T>, ipiv: &[i32]) {
    let npiv = ipiv.len().min(lu.ncols());
    for j in 0..npiv.saturating_sub(1) {
        for (k, &p) in ipiv.iter().enumerate().take(npiv).skip(j + 1) {
            let r = pivot_row(p);
            if r != k {
                lu.swap((k, j), (r, j));
            }
        }
    }
}

/// Apply the pivot sequence to every column, in order.
pub fn apply_pivots<T: BandScalar>(a: &mut DMatrix<T>, ipiv: &[i32]) {
    for (k, &p) in ipiv.iter().enumerate() {
        let r = pivot_row(p);
        if r != k {
            a.swap_rows(k, r);
        }
    }
}

/// Lower trapezoid of the first `min_mn` columns with a unit diagonal.
pub fn unit_lower_factor<T: BandScalar>(lu: &DMatrix<T>, min_mn: usize) -> Result<DMatrix<T>> {
    let m = lu.nrows();
    let mut l = dense::zeros::<T>(m, min_mn)?;
    for j in 0..min_mn {
        for i in (j + 1)..m {
            l[(i, j)] = lu[(i, j)];
        }
        l[(j, j)] = nalgebra::one();
    }
    Ok(l)
}

/// Upper trapezoid of the first `min_mn` rows, diagonal included.
pub fn upper_factor<T: BandScalar>(lu: &DMatrix<T>, min_mn: usize) -> Result<DMatrix<T>> {
    let n = lu.ncols();
    let mut u = dense::zeros::<T>(min_mn, n)?;
    for j in 0..n {
        for i in 0..min_mn.min(j + 1) {
            u[(i, j)] = lu[(i, j)];
        }
    }
    Ok(u)
}

fn normalize(residual: f64, matnorm: f64, n: usize) -> f64 {
    if matnorm == 0.0 {
        return if residual == 0.0 { 0.0 } else { f64::INFINITY };
    }
    residual / (matnorm * n as f64)
}
