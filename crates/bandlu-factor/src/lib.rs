//! Banded LU factorization routines.
//!
//! This crate provides:
//! - The [`BandLuFactorizer`] seam every factorization routine implements
//! - [`ReferenceBandLu`], the sequential `gbtf2`-style reference kernel
//! - [`ParallelBandLu`], a strided-batch backend running members in parallel
//! - [`BackendSelector`] for choosing between them at runtime
//!
//! # Usage
//!
//! ```
//! use bandlu_core::{BandDims, fill_uniform};
//! use bandlu_factor::{BackendSelector, BandLuFactorizer};
//!
//! let dims = BandDims::square(8, 2, 2);
//! let ldab = dims.band_rows();
//! let mut ab = vec![0.0f64; ldab * dims.n];
//! fill_uniform(1, 0, &mut ab);
//!
//! let factorizer = BackendSelector::auto().create_factorizer::<f64>();
//! let mut ipiv = vec![0; dims.min_mn()];
//! let info = factorizer.factor(&dims, &mut ab, ldab, &mut ipiv)?;
//! assert_eq!(info, 0);
//! # Ok::<(), bandlu_factor::Error>(())
//! ```

pub mod backend;
pub mod error;
pub mod factorizer;
pub mod parallel;
pub mod reference;

pub use backend::{BackendSelector, BackendType};
pub use error::{Error, Result};
pub use factorizer::BandLuFactorizer;
pub use parallel::{ParallelBandLu, ParallelConfig};
pub use reference::{ReferenceBandLu, gbtf2};
