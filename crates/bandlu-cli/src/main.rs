//! Band LU test driver.
//!
//! Generates random band matrices, factors each one through a padded
//! (device-pitch) buffer with the selected backend, optionally times the
//! reference routine on the same input, and checks the factorization with
//! the normalized residual. The exit status is the number of failed trials.

mod options;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use bandlu_core::{BandDims, BandScalar, copy_block, fill_uniform, round_up, to_pitch};
use bandlu_factor::{BackendSelector, BandLuFactorizer, gbtf2};
use bandlu_verify::{ResidualCheck, RunReport, Tolerance, TrialRecord, check_factorization};
use clap::Parser;
use num_complex::Complex64;

use options::{Precision, RangeSpec, SizeSpec, collect_sizes};

#[derive(Parser)]
#[command(name = "bandlu-check")]
#[command(about = "Factor random band matrices and check ||PA - LU||", long_about = None)]
#[command(version)]
struct Cli {
    /// Matrix size: N, M,N or MxN (repeatable)
    #[arg(short = 'N', long = "size", value_name = "SIZE")]
    sizes: Vec<SizeSpec>,

    /// Square sizes start:stop:step, stop inclusive (repeatable)
    #[arg(long = "range", value_name = "START:STOP:STEP")]
    ranges: Vec<RangeSpec>,

    /// Lower bandwidth
    #[arg(long, default_value_t = 1)]
    kl: usize,

    /// Upper bandwidth
    #[arg(long, default_value_t = 1)]
    ku: usize,

    /// Repetitions per size
    #[arg(long, default_value_t = 1)]
    niter: usize,

    /// Error threshold as a multiple of the unit roundoff
    #[arg(long, default_value_t = bandlu_verify::DEFAULT_MULTIPLIER)]
    tolerance: f64,

    /// Also time the reference routine
    #[arg(short = 'l', long)]
    lapack: bool,

    /// Skip the residual check
    #[arg(long = "no-check")]
    no_check: bool,

    /// Alignment of the padded leading dimension
    #[arg(long, default_value_t = 32)]
    align: usize,

    /// Seed for the matrix generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Scalar type
    #[arg(long, value_enum, default_value_t = Precision::Z)]
    precision: Precision,

    /// Factorization backend: auto, reference (cpu), or parallel
    #[arg(long, default_value = "auto")]
    backend: String,

    /// Write a JSON report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let report = match cli.precision {
        Precision::Z => run_trials::<Complex64>(&cli)?,
        Precision::D => run_trials::<f64>(&cli)?,
    };

    if let Some(ref path) = cli.report {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        if cli.verbose {
            println!("Report written to {}", path.display());
        }
    }

    let failures = report.failure_count();
    Ok(ExitCode::from(failures.min(u8::MAX as usize) as u8))
}

fn run_trials<T: BandScalar>(cli: &Cli) -> Result<RunReport> {
    let selector = BackendSelector::from_name(&cli.backend)?;
    let backend = selector.resolve();
    let factorizer = selector.create_factorizer::<T>();
    let tolerance = Tolerance::new(cli.tolerance);
    let threshold = tolerance.threshold();
    let sizes = collect_sizes(&cli.sizes, &cli.ranges);

    if cli.verbose {
        println!("Backend: {}", backend);
        println!("Precision: {}", T::PRECISION);
        println!("Sizes: {}", sizes.len());
        println!("Iterations: {}", cli.niter);
        println!("Alignment: {}", cli.align);
        println!("Seed: {}", cli.seed);
        println!(
            "Threshold: {:.2e} ({} x unit roundoff)",
            threshold, cli.tolerance
        );
        println!();
    }

    let mut report = RunReport::new(T::PRECISION, backend.name(), tolerance);

    println!("% ## INFO ##: Gflop/s calculation is not available");
    println!("% Lower bandwidth (KL) = {}", cli.kl);
    println!("% Upper bandwidth (KU) = {}", cli.ku);
    println!("{}", report.table_header());

    let mut stream = 0u64;
    for size in &sizes {
        let dims = BandDims::new(size.m, size.n, cli.kl, cli.ku);
        for iter in 0..cli.niter {
            let record = run_trial(cli, factorizer.as_ref(), &dims, iter, stream, threshold)
                .with_context(|| format!("Trial {} iteration {} failed", dims, iter))?;
            stream += 1;
            println!("{}", record.to_row());
            report.add_trial(record);
        }
        if cli.niter > 1 {
            println!();
        }
    }

    if cli.verbose {
        println!(
            "{} of {} checked trials passed, max error {:.2e}",
            report.summary.passed_trials, report.summary.checked_trials, report.summary.max_error
        );
    }

    Ok(report)
}

/// Generate, stage, factor, copy back and check one matrix.
fn run_trial<T: BandScalar>(
    cli: &Cli,
    factorizer: &dyn BandLuFactorizer<T>,
    dims: &BandDims,
    iteration: usize,
    stream: u64,
    threshold: f64,
) -> Result<TrialRecord> {
    let ldab = dims.band_rows();
    let lddab = round_up(ldab, cli.align);
    let n2 = dims.band_len(ldab)?;
    let stride_a = dims.band_len(lddab)?;

    let mut h_a = bandlu_core::dense::zeroed_vec::<T>(n2)?;
    fill_uniform(cli.seed, stream, &mut h_a);
    let h_r = h_a.clone();

    let mut d_a = to_pitch(ldab, dims.n, &h_r, ldab, lddab)?;
    let mut d_ipiv = vec![0i32; dims.min_mn()];
    let mut d_info = [0i32];

    let start = Instant::now();
    factorizer.factor_batched_strided(
        dims,
        &mut d_a,
        lddab,
        stride_a,
        &mut d_ipiv,
        dims.min_mn(),
        &mut d_info,
        1,
    )?;
    let factor_ms = start.elapsed().as_secs_f64() * 1000.0;

    let mut h_factored = bandlu_core::dense::zeroed_vec::<T>(n2)?;
    copy_block(ldab, dims.n, &d_a, lddab, &mut h_factored, ldab)?;
    drop(d_a);

    let info = d_info[0];
    if info != 0 {
        println!(
            "{} factorization returned status {}",
            factorizer.backend_type().name(),
            info
        );
    }

    let mut record = TrialRecord::unchecked(*dims, iteration, factor_ms, info);

    if cli.lapack {
        let mut ipiv = vec![0i32; dims.min_mn()];
        let start = Instant::now();
        let ref_info = gbtf2(dims, &mut h_a, ldab, &mut ipiv)?;
        let reference_ms = start.elapsed().as_secs_f64() * 1000.0;
        if ref_info != 0 {
            println!("reference factorization returned status {}", ref_info);
        }
        record = record.with_reference_ms(reference_ms);
    }

    if !cli.no_check {
        let check: ResidualCheck =
            check_factorization(dims, &h_r, ldab, &h_factored, ldab, &d_ipiv, info)?;
        record = record.with_check(&check, threshold);
    }

    Ok(record)
}
