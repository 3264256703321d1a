//! Fallible allocation of dense scratch matrices.
//!
//! Verification scratch can be large (M×N per matrix, several matrices per
//! check). A failed allocation has to surface as an error for that check
//! rather than abort the whole run, so buffers are reserved with
//! `try_reserve_exact` before being handed to nalgebra.

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::scalar::BandScalar;

/// Allocate a zero-filled `nrows × ncols` column-major matrix.
pub fn zeros<T: BandScalar>(nrows: usize, ncols: usize) -> Result<DMatrix<T>> {
    let len = nrows
        .checked_mul(ncols)
        .ok_or(Error::SizeOverflow("dense scratch length"))?;
    let data = zeroed_vec::<T>(len)?;
    Ok(DMatrix::from_vec(nrows, ncols, data))
}

/// Allocate a zero-filled vector of `len` scalars.
pub fn zeroed_vec<T: BandScalar>(len: usize) -> Result<Vec<T>> {
    let mut data: Vec<T> = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::Allocation { elements: len })?;
    data.resize(len, nalgebra::zero::<T>());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn zeros_shape() {
        let a = zeros::<f64>(3, 5).unwrap();
        assert_eq!(a.shape(), (3, 5));
        assert!(a.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zeros_empty() {
        let a = zeros::<Complex64>(0, 4).unwrap();
        assert_eq!(a.shape(), (0, 4));
    }

    #[test]
    fn zeros_overflow_is_an_error() {
        let result = zeros::<f64>(usize::MAX, 2);
        assert!(matches!(result, Err(Error::SizeOverflow(_))));
    }

    #[test]
    fn huge_allocation_is_an_error() {
        let result = zeroed_vec::<f64>(usize::MAX / 8);
        assert!(matches!(result, Err(Error::Allocation { .. })));
    }
}
