//! One trial's correctness check.
//!
//! A factorization that reported failure, or that produced an out-of-range
//! pivot, is not evaluated at all: its check is skipped and the trial counts
//! as failed. Skipped checks carry the conventional `-1` error value so they
//! can never pass a `0 <= error < threshold` test.

use std::fmt;

use bandlu_core::{BandDims, BandScalar};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pivots::{InvalidPivot, validate_pivots};
use crate::residual::band_lu_residual;

/// Error value reported for a skipped check.
pub const FAILED_SENTINEL: f64 = -1.0;

/// Why a residual was not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The factorization returned a nonzero status.
    FactorizationStatus { info: i32 },
    /// A pivot entry was outside `[1, m]`.
    InvalidPivot { index: usize, value: i32 },
}

impl From<InvalidPivot> for SkipReason {
    fn from(p: InvalidPivot) -> Self {
        SkipReason::InvalidPivot {
            index: p.index,
            value: p.value,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FactorizationStatus { info } => {
                write!(f, "factorization returned status {}", info)
            }
            SkipReason::InvalidPivot { index, value } => {
                write!(f, "ipiv @ {} = {}, terminated on first occurrence", index, value)
            }
        }
    }
}

/// Outcome of checking one factorization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResidualCheck {
    /// Normalized residual `‖LU − PA‖ / (‖A‖·N)`.
    Computed(f64),
    /// The residual was not computed.
    Skipped(SkipReason),
}

impl ResidualCheck {
    /// Error value: the residual, or [`FAILED_SENTINEL`] when skipped.
    pub fn value(&self) -> f64 {
        match self {
            ResidualCheck::Computed(e) => *e,
            ResidualCheck::Skipped(_) => FAILED_SENTINEL,
        }
    }

    /// `error >= 0 && error < threshold`.
    pub fn passes(&self, threshold: f64) -> bool {
        let e = self.value();
        e >= 0.0 && e < threshold
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ResidualCheck::Computed(_) => None,
            ResidualCheck::Skipped(reason) => Some(*reason),
        }
    }
}

/// Check a factorization against the matrix it was computed from.
///
/// `info` is the status the factorization returned. A nonzero status or an
/// out-of-range pivot skips the residual.
///
/// # Errors
/// Returns an error only when the check itself cannot run: malformed
/// buffers, a pivot sequence of the wrong length, or a failed allocation.
pub fn check_factorization<T: BandScalar>(
    dims: &BandDims,
    original: &[T],
    ldab: usize,
    factored: &[T],
    ldlub: usize,
    ipiv: &[i32],
    info: i32,
) -> Result<ResidualCheck> {
    if info != 0 {
        log::warn!("{}: factorization returned status {}, skipping check", dims, info);
        return Ok(ResidualCheck::Skipped(SkipReason::FactorizationStatus {
            info,
        }));
    }

    let min_mn = dims.min_mn();
    if ipiv.len() != min_mn {
        return Err(Error::PivotLength {
            expected: min_mn,
            actual: ipiv.len(),
        });
    }

    if let Err(bad) = validate_pivots(ipiv, dims.m) {
        log::warn!("{}: {}, skipping check", dims, bad);
        return Ok(ResidualCheck::Skipped(bad.into()));
    }

    let error = band_lu_residual(dims, original, ldab, factored, ldlub, ipiv)?;
    Ok(ResidualCheck::Computed(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bandlu_core::fill_uniform;
    use bandlu_factor::gbtf2;

    fn factored(dims: BandDims) -> (Vec<f64>, Vec<f64>, Vec<i32>, usize) {
        let ldab = dims.band_rows();
        let mut original = vec![0.0; ldab * dims.n];
        fill_uniform(77, 0, &mut original);
        let mut lu = original.clone();
        let mut ipiv = vec![0; dims.min_mn()];
        gbtf2(&dims, &mut lu, ldab, &mut ipiv).unwrap();
        (original, lu, ipiv, ldab)
    }

    #[test]
    fn good_factorization_passes() {
        let dims = BandDims::square(8, 2, 2);
        let (a, lu, ipiv, ldab) = factored(dims);
        let check = check_factorization(&dims, &a, ldab, &lu, ldab, &ipiv, 0).unwrap();

        assert!(matches!(check, ResidualCheck::Computed(_)));
        assert!(check.passes(100.0 * f64::EPSILON));
        assert!(check.skip_reason().is_none());
    }

    #[test]
    fn nonzero_status_is_skipped() {
        let dims = BandDims::square(8, 2, 2);
        let (a, lu, ipiv, ldab) = factored(dims);
        let check = check_factorization(&dims, &a, ldab, &lu, ldab, &ipiv, 3).unwrap();

        assert_eq!(
            check,
            ResidualCheck::Skipped(SkipReason::FactorizationStatus { info: 3 })
        );
        assert_eq!(check.value(), FAILED_SENTINEL);
        assert!(!check.passes(1.0));
    }

    #[test]
    fn status_wins_over_bad_buffers() {
        // A failed factorization is never densified, even with garbage input.
        let dims = BandDims::square(8, 2, 2);
        let check = check_factorization::<f64>(&dims, &[], 0, &[], 0, &[], -4).unwrap();
        assert_eq!(check.value(), FAILED_SENTINEL);
    }

    #[test]
    fn injected_out_of_range_pivots_are_skipped() {
        let dims = BandDims::square(8, 2, 2);
        let (a, lu, ipiv, ldab) = factored(dims);
        for bad in [0, 9, -1, i32::MAX] {
            let mut p = ipiv.clone();
            p[5] = bad;
            let check = check_factorization(&dims, &a, ldab, &lu, ldab, &p, 0).unwrap();
            assert_eq!(
                check.skip_reason(),
                Some(SkipReason::InvalidPivot {
                    index: 5,
                    value: bad
                })
            );
            assert!(!check.passes(f64::INFINITY));
        }
    }

    #[test]
    fn wrong_pivot_length_is_a_hard_error() {
        let dims = BandDims::square(8, 2, 2);
        let (a, lu, ipiv, ldab) = factored(dims);
        let result = check_factorization(&dims, &a, ldab, &lu, ldab, &ipiv[..7], 0);
        assert!(matches!(result, Err(Error::PivotLength { .. })));
    }

    #[test]
    fn passes_is_strict() {
        assert!(!ResidualCheck::Computed(1e-15).passes(1e-15));
        assert!(ResidualCheck::Computed(0.0).passes(1e-15));
        assert!(!ResidualCheck::Computed(f64::NAN).passes(1.0));
    }

    #[test]
    fn skip_reason_display() {
        let reason = SkipReason::InvalidPivot { index: 2, value: 0 };
        assert_eq!(
            reason.to_string(),
            "ipiv @ 2 = 0, terminated on first occurrence"
        );
    }

    #[test]
    fn skip_reason_json_shape() {
        let json = serde_json::to_string(&SkipReason::FactorizationStatus { info: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"factorization_status","info":2}"#);
    }
}
