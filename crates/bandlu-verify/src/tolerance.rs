//! Pass/fail threshold for residual checks.

use bandlu_core::UNIT_ROUNDOFF;
use serde::{Deserialize, Serialize};

/// Default multiple of the unit roundoff a residual may reach.
pub const DEFAULT_MULTIPLIER: f64 = 30.0;

/// Residual tolerance, expressed as a multiple of the unit roundoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Multiplier applied to [`UNIT_ROUNDOFF`].
    pub multiplier: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl Tolerance {
    pub fn new(multiplier: f64) -> Self {
        Self { multiplier }
    }

    /// Create with a custom multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Absolute threshold a residual must stay below.
    pub fn threshold(&self) -> f64 {
        self.multiplier * UNIT_ROUNDOFF
    }
}
