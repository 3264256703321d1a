//! Trial records and run reports.

use std::path::Path;

use bandlu_core::BandDims;
use serde::{Deserialize, Serialize};

use crate::check::{ResidualCheck, SkipReason};
use crate::error::{Error, Result};
use crate::tolerance::Tolerance;

/// Result of one factorization trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Matrix shape and bandwidths.
    pub dims: BandDims,
    /// Repetition index within this size.
    pub iteration: usize,
    /// Wall time of the reference routine, if it was run (ms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_ms: Option<f64>,
    /// Wall time of the routine under test (ms).
    pub factor_ms: f64,
    /// Status the routine under test returned.
    pub info: i32,
    /// Residual, or -1 when the check was skipped. `None` when not checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    /// Why the check was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    /// Pass/fail judgment. `None` when not checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

impl TrialRecord {
    /// Record a trial that was not checked.
    pub fn unchecked(dims: BandDims, iteration: usize, factor_ms: f64, info: i32) -> Self {
        Self {
            dims,
            iteration,
            reference_ms: None,
            factor_ms,
            info,
            error: None,
            skipped: None,
            passed: None,
        }
    }

    /// Attach a check outcome judged against `threshold`.
    pub fn with_check(mut self, check: &ResidualCheck, threshold: f64) -> Self {
        self.error = Some(check.value());
        self.skipped = check.skip_reason();
        self.passed = Some(check.passes(threshold));
        self
    }

    /// Attach the reference routine's timing.
    pub fn with_reference_ms(mut self, ms: f64) -> Self {
        self.reference_ms = Some(ms);
        self
    }

    pub fn failed(&self) -> bool {
        self.passed == Some(false)
    }

    /// One table row, matching [`RunReport::table_header`].
    ///
    /// Flop rates are not defined for band factorizations and are shown as `---`.
    pub fn to_row(&self) -> String {
        let reference = match self.reference_ms {
            Some(ms) => format!("  ---   ({:7.2})", ms),
            None => "  ---   (  ---  )".to_string(),
        };
        let check = match (self.error, self.passed) {
            (Some(e), Some(ok)) => format!("{:10.2e}   {}", e, if ok { "ok" } else { "failed" }),
            _ => "       ---".to_string(),
        };
        format!(
            "{:5} {:5}   {}      ---  ({:7.2})   {}",
            self.dims.m, self.dims.n, reference, self.factor_ms, check
        )
    }
}

/// Summary statistics for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Trials executed.
    pub total_trials: usize,
    /// Trials whose factorization was checked.
    pub checked_trials: usize,
    /// Checked trials that passed.
    pub passed_trials: usize,
    /// Checked trials that failed (including skipped checks).
    pub failed_trials: usize,
    /// Largest computed residual.
    pub max_error: f64,
}

/// Complete run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Precision tag (`d` or `z`).
    pub precision: char,
    /// Name of the routine under test.
    pub backend: String,
    /// Tolerance the checks were judged against.
    pub tolerance: Tolerance,
    /// Absolute residual threshold.
    pub threshold: f64,
    /// Per-trial results.
    pub trials: Vec<TrialRecord>,
    /// Overall summary.
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(precision: char, backend: &str, tolerance: Tolerance) -> Self {
        Self {
            precision,
            backend: backend.to_string(),
            tolerance,
            threshold: tolerance.threshold(),
            trials: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Add a trial and update the summary.
    pub fn add_trial(&mut self, trial: TrialRecord) {
        self.summary.total_trials += 1;
        if let Some(passed) = trial.passed {
            self.summary.checked_trials += 1;
            if passed {
                self.summary.passed_trials += 1;
            } else {
                self.summary.failed_trials += 1;
            }
        }
        if trial.skipped.is_none() {
            if let Some(e) = trial.error {
                self.summary.max_error = self.summary.max_error.max(e);
            }
        }
        self.trials.push(trial);
    }

    /// Number of failed trials (the process exit status).
    pub fn failure_count(&self) -> usize {
        self.summary.failed_trials
    }

    pub fn passed(&self) -> bool {
        self.summary.failed_trials == 0
    }

    /// Column header for [`TrialRecord::to_row`].
    pub fn table_header(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "%     M     N   CPU Gflop/s (ms)   {} Gflop/s (ms)   ||PA-LU||/(||A||*N)\n",
            self.backend
        ));
        out.push_str(&format!("%{}", "=".repeat(86)));
        out
    }

    /// Format as human-readable text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "Band LU Report: precision {}, backend {}\n",
            self.precision, self.backend
        ));
        out.push_str(&format!(
            "Status: {}\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));
        out.push_str(&format!(
            "Trials: {}/{} checked trials passed ({} total), threshold {:.2e}\n",
            self.summary.passed_trials,
            self.summary.checked_trials,
            self.summary.total_trials,
            self.threshold
        ));
        out.push_str(&format!("Max error: {:.2e}\n\n", self.summary.max_error));

        out.push_str(&self.table_header());
        out.push('\n');
        for trial in &self.trials {
            out.push_str(&trial.to_row());
            out.push('\n');
        }

        if !self.passed() {
            out.push_str("\nFailed trials:\n");
            for trial in self.trials.iter().filter(|t| t.failed()) {
                let why = match &trial.skipped {
                    Some(reason) => reason.to_string(),
                    None => format!("error {:.2e}", trial.error.unwrap_or(f64::NAN)),
                };
                out.push_str(&format!(
                    "  - {} iteration {}: {}\n",
                    trial.dims, trial.iteration, why
                ));
            }
        }

        out
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| Error::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
