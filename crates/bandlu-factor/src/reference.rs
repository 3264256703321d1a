//! Sequential reference factorization.
//!
//! Unblocked banded LU with partial pivoting in the conventional `gbtf2`
//! formulation. Band storage follows [`bandlu_core::dims`]: entry `(i, j)`
//! lives at band row `kv + i - j`, and the top `kl` rows receive the
//! superdiagonals created by row interchanges.
//!
//! At step `j` the pivot is the entry of largest `|re| + |im|` among rows
//! `j..=j+kl`; the interchange is applied to columns `j..=ju` only, where
//! `ju` is the rightmost column U has reached so far. Multipliers already
//! stored in earlier columns are never permuted by later interchanges, which
//! is why the verifier has to replay them.

use bandlu_core::{BandDims, BandScalar};

use crate::backend::BackendType;
use crate::error::{Error, Result};
use crate::factorizer::BandLuFactorizer;

/// Factor an `ldab`-pitched band matrix in place.
///
/// Returns `0` on success or the 1-based index of the first exactly-zero
/// pivot.
///
/// # Errors
/// Returns an error if `ab` or `ipiv` cannot hold the matrix.
pub fn gbtf2<T: BandScalar>(
    dims: &BandDims,
    ab: &mut [T],
    ldab: usize,
    ipiv: &mut [i32],
) -> Result<i32> {
    dims.check_band(ab.len(), ldab)?;
    let min_mn = dims.min_mn();
    if ipiv.len() < min_mn {
        return Err(Error::PivotBuffer {
            expected: min_mn,
            actual: ipiv.len(),
        });
    }

    let BandDims { m, n, kl, ku } = *dims;
    if m == 0 || n == 0 {
        return Ok(0);
    }
    let kv = dims.kv();
    let at = move |i: usize, j: usize| j * ldab + kv + i - j;
    let zero = nalgebra::zero::<T>();

    // Clear the fill-in rows of the leading columns; later columns are
    // cleared just before elimination reaches them.
    for j in (ku + 1)..kv.min(n) {
        for i in (kv - j)..kl {
            ab[j * ldab + i] = zero;
        }
    }

    let mut ju = 0;
    let mut info = 0;

    for j in 0..min_mn {
        if j + kv < n {
            let c = j + kv;
            ab[c * ldab..c * ldab + kl].fill(zero);
        }

        let km = kl.min(m - j - 1);
        let mut jp = 0;
        let mut best = ab[at(j, j)].abs1();
        for p in 1..=km {
            let v = ab[at(j + p, j)].abs1();
            if v > best {
                best = v;
                jp = p;
            }
        }
        ipiv[j] = (j + jp + 1) as i32;

        if ab[at(j + jp, j)] == zero {
            if info == 0 {
                info = (j + 1) as i32;
            }
            continue;
        }

        ju = ju.max((j + ku + jp).min(n - 1));

        if jp != 0 {
            for c in j..=ju {
                ab.swap(at(j + jp, c), at(j, c));
            }
        }

        if km > 0 {
            let recip = nalgebra::one::<T>() / ab[at(j, j)];
            for p in 1..=km {
                ab[at(j + p, j)] *= recip;
            }

            for c in (j + 1)..=ju {
                let u = ab[at(j, c)];
                if u == zero {
                    continue;
                }
                for p in 1..=km {
                    let l = ab[at(j + p, j)];
                    ab[at(j + p, c)] -= l * u;
                }
            }
        }
    }

    if info != 0 {
        log::debug!("band LU of {} hit a zero pivot at step {}", dims, info);
    }
    Ok(info)
}

/// The sequential reference factorizer.
///
/// Used for timing comparisons and as the trusted factorization in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBandLu;

impl ReferenceBandLu {
    pub fn new() -> Self {
        Self
    }
}

impl<T: BandScalar> BandLuFactorizer<T> for ReferenceBandLu {
    fn factor(
        &self,
        dims: &BandDims,
        ab: &mut [T],
        ldab: usize,
        ipiv: &mut [i32],
    ) -> Result<i32> {
        gbtf2(dims, ab, ldab, ipiv)
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandlu_core::original_band_to_dense;
    use nalgebra::DMatrix;

    /// Pack a dense matrix into original band layout.
    fn pack(dims: &BandDims, a: &DMatrix<f64>) -> (Vec<f64>, usize) {
        let ldab = dims.band_rows();
        let kv = dims.kv();
        let mut ab = vec![0.0; ldab * dims.n];
        for j in 0..dims.n {
            for i in j.saturating_sub(dims.ku)..(j + dims.kl + 1).min(dims.m) {
                ab[j * ldab + kv + i - j] = a[(i, j)];
            }
        }
        (ab, ldab)
    }

    #[test]
    fn diagonal_matrix_needs_no_pivoting() {
        let dims = BandDims::square(3, 0, 0);
        let mut ab = vec![2.0, 3.0, 4.0];
        let mut ipiv = vec![0; 3];
        let info = gbtf2(&dims, &mut ab, 1, &mut ipiv).unwrap();

        assert_eq!(info, 0);
        assert_eq!(ipiv, vec![1, 2, 3]);
        assert_eq!(ab, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn two_by_two_pivots_on_larger_entry() {
        // A = [[1, 2], [4, 3]]
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 3.0]);
        let dims = BandDims::square(2, 1, 1);
        let (mut ab, ldab) = pack(&dims, &a);
        let mut ipiv = vec![0; 2];
        let info = gbtf2(&dims, &mut ab, ldab, &mut ipiv).unwrap();

        assert_eq!(info, 0);
        assert_eq!(ipiv, vec![2, 2]);
        // U = [[4, 3], [0, 2 - 0.25*3]], L multiplier 0.25
        let kv = dims.kv();
        let get = |i: usize, j: usize| ab[j * ldab + kv + i - j];
        assert!((get(0, 0) - 4.0).abs() < 1e-15);
        assert!((get(0, 1) - 3.0).abs() < 1e-15);
        assert!((get(1, 1) - 1.25).abs() < 1e-15);
        assert!((get(1, 0) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn pivots_stay_within_band() {
        let dims = BandDims::square(10, 2, 1);
        let ldab = dims.band_rows();
        let mut ab = vec![0.0; ldab * dims.n];
        bandlu_core::fill_uniform(3, 0, &mut ab);
        let mut ipiv = vec![0; 10];
        gbtf2(&dims, &mut ab, ldab, &mut ipiv).unwrap();

        for (k, &p) in ipiv.iter().enumerate() {
            let p = p as usize;
            assert!(p >= k + 1 && p <= (k + 1 + dims.kl).min(dims.m), "ipiv[{}] = {}", k, p);
        }
    }

    #[test]
    fn zero_column_reports_status() {
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let dims = BandDims::square(3, 1, 1);
        let (mut ab, ldab) = pack(&dims, &a);
        let mut ipiv = vec![0; 3];
        let info = gbtf2(&dims, &mut ab, ldab, &mut ipiv).unwrap();
        assert_eq!(info, 2);
    }

    #[test]
    fn leaves_original_unchanged_when_already_upper() {
        let a = DMatrix::from_row_slice(3, 3, &[5.0, 1.0, 0.0, 0.0, 6.0, 2.0, 0.0, 0.0, 7.0]);
        let dims = BandDims::square(3, 1, 1);
        let (mut ab, ldab) = pack(&dims, &a);
        let mut ipiv = vec![0; 3];
        gbtf2(&dims, &mut ab, ldab, &mut ipiv).unwrap();

        let again = original_band_to_dense(&dims, &ab, ldab).unwrap();
        assert_eq!(again, a);
        assert_eq!(ipiv, vec![1, 2, 3]);
    }

    #[test]
    fn short_pivot_buffer_is_rejected() {
        let dims = BandDims::square(3, 0, 0);
        let mut ab = vec![1.0; 3];
        let mut ipiv = vec![0; 2];
        let result = gbtf2(&dims, &mut ab, 1, &mut ipiv);
        assert!(matches!(result, Err(Error::PivotBuffer { .. })));
    }

    #[test]
    fn empty_matrix() {
        let dims = BandDims::new(0, 3, 1, 1);
        let ldab = dims.band_rows();
        let mut ab = vec![0.0; ldab * 3];
        let mut ipiv: Vec<i32> = vec![];
        assert_eq!(gbtf2(&dims, &mut ab, ldab, &mut ipiv).unwrap(), 0);
    }

    #[test]
    fn trait_object_dispatch() {
        let f: Box<dyn BandLuFactorizer<f64>> = Box::new(ReferenceBandLu::new());
        assert_eq!(f.backend_type(), BackendType::Reference);
        let dims = BandDims::square(2, 0, 0);
        let mut ab = vec![1.0, 2.0];
        let mut ipiv = vec![0; 2];
        assert_eq!(f.factor(&dims, &mut ab, 1, &mut ipiv).unwrap(), 0);
    }
}
