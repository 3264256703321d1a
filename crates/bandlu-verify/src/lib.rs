//! Correctness checks for banded LU factorizations.
//!
//! Given the original band matrix, the packed factors a routine produced and
//! its pivot sequence, this crate rebuilds `L`, `U` and `P·A` densely and
//! reports the normalized residual `‖LU − PA‖_F / (‖A‖_F · N)`.
//!
//! - [`band_lu_residual`] computes the residual directly
//! - [`check_factorization`] wraps it with the status and pivot screening a
//!   test harness needs, producing a [`ResidualCheck`]
//! - [`RunReport`] collects per-trial [`TrialRecord`]s into text or JSON

pub mod check;
pub mod error;
pub mod pivots;
pub mod report;
pub mod residual;
pub mod tolerance;

pub use check::{FAILED_SENTINEL, ResidualCheck, SkipReason, check_factorization};
pub use error::{Error, Result};
pub use pivots::{InvalidPivot, validate_pivots};
pub use report::{RunReport, RunSummary, TrialRecord};
pub use residual::band_lu_residual;
pub use tolerance::{DEFAULT_MULTIPLIER, Tolerance};
