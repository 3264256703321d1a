//! Core types for verifying banded LU factorizations.
//!
//! This crate provides:
//! - [`BandDims`] and the compact band storage convention
//! - Band-to-dense conversion for original and factored band layouts
//! - Fallible dense scratch allocation
//! - Staging between tightly pitched and aligned band buffers
//! - Deterministic random fills for test matrices

pub mod convert;
pub mod dense;
pub mod dims;
pub mod error;
pub mod pitch;
pub mod rng;
pub mod scalar;

pub use convert::{factored_band_to_dense, original_band_to_dense};
pub use dims::BandDims;
pub use error::{Error, Result};
pub use pitch::{copy_block, round_up, to_pitch};
pub use rng::fill_uniform;
pub use scalar::{BandScalar, UNIT_ROUNDOFF};
