//! Factorization backend detection and selection.
//!
//! [`BackendType`] names a factorization routine; [`BackendSelector`] turns a
//! preference into a boxed [`BandLuFactorizer`], falling back to the
//! reference routine when the preferred one cannot run here.

use std::fmt;

use bandlu_core::BandScalar;

use crate::error::{Error, Result};
use crate::factorizer::BandLuFactorizer;
use crate::parallel::{ParallelBandLu, ParallelConfig};
use crate::reference::ReferenceBandLu;

/// Which factorization routine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendType {
    /// Sequential reference kernel (always available).
    Reference,
    /// Batch members factored concurrently on the rayon pool.
    #[default]
    Parallel,
}

impl BackendType {
    /// Parse a backend name from a CLI argument string.
    ///
    /// Accepts `"reference"` (alias `"cpu"`) and `"parallel"`. Returns `None`
    /// for `"auto"`, which callers resolve with [`BackendSelector::auto`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "reference" | "cpu" => Some(BackendType::Reference),
            "parallel" => Some(BackendType::Parallel),
            _ => None,
        }
    }

    /// Short name for display.
    pub fn name(&self) -> &'static str {
        match self {
            BackendType::Reference => "Reference",
            BackendType::Parallel => "Parallel",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendType::Reference => write!(f, "Reference (sequential)"),
            BackendType::Parallel => {
                write!(f, "Parallel ({} threads)", rayon::current_num_threads())
            }
        }
    }
}

/// Selector for choosing the factorization backend.
#[derive(Debug, Clone, Default)]
pub struct BackendSelector {
    /// Preferred backend; `None` means auto-detect.
    pub preferred: Option<BackendType>,
    /// Configuration for the parallel backend.
    pub parallel: ParallelConfig,
}

impl BackendSelector {
    /// Auto-detect the best available backend.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Force the sequential reference routine.
    pub fn reference_only() -> Self {
        Self {
            preferred: Some(BackendType::Reference),
            parallel: ParallelConfig::default(),
        }
    }

    /// Prefer the given backend.
    pub fn prefer(backend: BackendType) -> Self {
        Self {
            preferred: Some(backend),
            parallel: ParallelConfig::default(),
        }
    }

    /// Parse `"auto"` or any name [`BackendType::from_name`] accepts.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("auto") {
            return Ok(Self::auto());
        }
        BackendType::from_name(name)
            .map(Self::prefer)
            .ok_or_else(|| Error::BackendUnavailable(format!("unknown backend '{}'", name)))
    }

    /// The backend [`create_factorizer`](Self::create_factorizer) will return.
    pub fn resolve(&self) -> BackendType {
        match self.preferred {
            Some(BackendType::Reference) => BackendType::Reference,
            Some(BackendType::Parallel) => BackendType::Parallel,
            None if rayon::current_num_threads() > 1 => BackendType::Parallel,
            None => {
                log::debug!("single worker thread, using the reference backend");
                BackendType::Reference
            }
        }
    }

    /// Create a factorizer for the selected backend.
    pub fn create_factorizer<T: BandScalar>(&self) -> Box<dyn BandLuFactorizer<T>> {
        match self.resolve() {
            BackendType::Reference => Box::new(ReferenceBandLu::new()),
            BackendType::Parallel => Box::new(ParallelBandLu::new(self.parallel.clone())),
        }
    }
}
