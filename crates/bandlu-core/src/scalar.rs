//! Scalar types a banded factorization can be checked in.
//!
//! The verifier is generic over real (`f64`) and complex (`Complex64`)
//! double precision. Both implement nalgebra's [`ComplexField`], which gives
//! the dense products and Frobenius norms the residual needs; this trait adds
//! the two operations the band code needs on top of that.

use nalgebra::ComplexField;
use num_complex::Complex64;

/// Relative machine precision for double precision with rounding (2^-53).
///
/// This is the quantity LAPACK's `dlamch('E')` reports, and the unit that
/// residual tolerances are expressed in.
pub const UNIT_ROUNDOFF: f64 = f64::EPSILON * 0.5;

/// Scalar stored in a banded matrix.
pub trait BandScalar: ComplexField<RealField = f64> + Copy {
    /// One-letter precision tag (`d` for real, `z` for complex).
    const PRECISION: char;

    /// Build a value from real and imaginary parts.
    ///
    /// Real scalars ignore `im`.
    fn from_parts(re: f64, im: f64) -> Self;

    /// `|re| + |im|`, the magnitude used to choose pivots.
    fn abs1(self) -> f64;

    /// Number of independent random draws needed per entry.
    fn parts() -> usize;
}

impl BandScalar for f64 {
    const PRECISION: char = 'd';

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re
    }

    #[inline]
    fn abs1(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn parts() -> usize {
        1
    }
}

impl BandScalar for Complex64 {
    const PRECISION: char = 'z';

    #[inline]
    fn from_parts(re: f64, im: f64) -> Self {
        Complex64::new(re, im)
    }

    #[inline]
    fn abs1(self) -> f64 {
        self.re.abs() + self.im.abs()
    }

    #[inline]
    fn parts() -> usize {
        2
    }
}
