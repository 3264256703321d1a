//! Reproducible random fills for test matrices.
//!
//! Counter-based: every value is a pure function of `(seed, stream, index)`,
//! so a trial's matrix depends only on the seed and the trial number and can
//! be regenerated independently of how many trials ran before it.
//!
//! # Algorithm
//!
//! SplitMix64 mixes the combined coordinates; the upper 53 bits become a
//! uniform f64 in [0, 1). Complex entries draw their real and imaginary
//! parts from consecutive indices, which matches the uniform (0, 1)
//! distribution LAPACK's `larnv` uses for its test matrices.

use crate::scalar::BandScalar;

/// SplitMix64 finalizer.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}

/// Combine seed, stream and index into one hash input.
#[inline]
pub fn combine_indices(seed: u64, stream: u64, index: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x517cc1b727220a95) ^ index.wrapping_mul(0x5851f42d4c957f2d)
}

/// Uniform f64 in [0, 1) at the given coordinates.
///
/// ```
/// use bandlu_core::rng::uniform;
///
/// let x = uniform(42, 0, 7);
/// assert!((0.0..1.0).contains(&x));
/// assert_eq!(x, uniform(42, 0, 7));
/// assert_ne!(x, uniform(42, 1, 7));
/// ```
#[inline]
pub fn uniform(seed: u64, stream: u64, index: u64) -> f64 {
    let hash = splitmix64(combine_indices(seed, stream, index));
    (hash >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Fill `buf` with uniform (0, 1) scalars from `stream`.
pub fn fill_uniform<T: BandScalar>(seed: u64, stream: u64, buf: &mut [T]) {
    let parts = T::parts() as u64;
    for (k, x) in buf.iter_mut().enumerate() {
        let base = k as u64 * parts;
        let re = uniform(seed, stream, base);
        let im = if parts > 1 {
            uniform(seed, stream, base + 1)
        } else {
            0.0
        };
        *x = T::from_parts(re, im);
    }
}
