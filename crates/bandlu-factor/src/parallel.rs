//! Data-parallel batched factorization using rayon.
//!
//! Stands in for an offload device: the members of a strided batch are
//! factored concurrently on rayon's work-stealing pool, and the call returns
//! only after every member has finished, so callers see the same
//! "launch, then synchronize" contract a device queue gives them.
//!
//! Each member is factored by the reference kernel on its own disjoint
//! slices of the band, pivot and status buffers.

use bandlu_core::{BandDims, BandScalar};
use rayon::prelude::*;

use crate::backend::BackendType;
use crate::error::Result;
use crate::factorizer::{BandLuFactorizer, BatchLayout};
use crate::reference::gbtf2;

/// Configuration for parallel batched execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Minimum batch size to go parallel (below this, members run sequentially).
    pub min_batch_for_parallel: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_batch_for_parallel: 2,
        }
    }
}

impl ParallelConfig {
    /// Set the minimum parallel batch size.
    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_batch_for_parallel = min;
        self
    }
}

/// Batched band LU running batch members in parallel.
#[derive(Debug, Clone, Default)]
pub struct ParallelBandLu {
    config: ParallelConfig,
}

impl ParallelBandLu {
    pub fn new(config: ParallelConfig) -> Self {
        log::info!(
            "parallel band LU initialized with {} worker threads",
            rayon::current_num_threads()
        );
        Self { config }
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }
}

impl<T: BandScalar> BandLuFactorizer<T> for ParallelBandLu {
    fn factor(
        &self,
        dims: &BandDims,
        ab: &mut [T],
        ldab: usize,
        ipiv: &mut [i32],
    ) -> Result<i32> {
        gbtf2(dims, ab, ldab, ipiv)
    }

    fn factor_batched_strided(
        &self,
        dims: &BandDims,
        ab: &mut [T],
        ldab: usize,
        stride_a: usize,
        ipiv: &mut [i32],
        stride_piv: usize,
        info: &mut [i32],
        batch_count: usize,
    ) -> Result<()> {
        let layout = BatchLayout::new(dims, ldab, stride_a, stride_piv, batch_count);
        layout.validate(ab.len(), ipiv.len(), info.len())?;

        let use_parallel = batch_count >= self.config.min_batch_for_parallel
            && rayon::current_num_threads() > 1;

        // A single member (or stride 0) cannot be chunked; run it in place.
        if !use_parallel || stride_a == 0 || stride_piv == 0 {
            log::debug!("factoring batch of {} sequentially", batch_count);
            for (k, status) in info.iter_mut().take(batch_count).enumerate() {
                let a = &mut ab[k * stride_a..k * stride_a + layout.matrix_len];
                let p = &mut ipiv[k * stride_piv..k * stride_piv + layout.pivot_len];
                *status = gbtf2(dims, a, ldab, p)?;
            }
            return Ok(());
        }

        log::debug!(
            "factoring batch of {} {} matrices on {} threads",
            batch_count,
            dims,
            rayon::current_num_threads()
        );

        ab.par_chunks_mut(stride_a)
            .zip(ipiv.par_chunks_mut(stride_piv))
            .zip(info[..batch_count].par_iter_mut())
            .try_for_each(|((a, p), status)| -> Result<()> {
                *status = gbtf2(
                    dims,
                    &mut a[..layout.matrix_len],
                    ldab,
                    &mut p[..layout.pivot_len],
                )?;
                Ok(())
            })
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Parallel
    }
}
