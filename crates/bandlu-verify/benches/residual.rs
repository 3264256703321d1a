//! Benchmarks for residual evaluation.

use bandlu_core::{BandDims, fill_uniform};
use bandlu_factor::gbtf2;
use bandlu_verify::band_lu_residual;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use num_complex::Complex64;

fn factored(dims: &BandDims) -> (Vec<Complex64>, Vec<Complex64>, Vec<i32>) {
    let ldab = dims.band_rows();
    let mut a = vec![Complex64::new(0.0, 0.0); ldab * dims.n];
    fill_uniform(1, 0, &mut a);
    let mut lu = a.clone();
    let mut ipiv = vec![0; dims.min_mn()];
    gbtf2(dims, &mut lu, ldab, &mut ipiv).unwrap();
    (a, lu, ipiv)
}

fn bench_residual(c: &mut Criterion) {
    let mut group = c.benchmark_group("band_lu_residual");

    for size in [32, 128, 256] {
        let dims = BandDims::square(size, 4, 4);
        let ldab = dims.band_rows();
        let (a, lu, ipiv) = factored(&dims);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| {
                band_lu_residual(
                    black_box(&dims),
                    black_box(&a),
                    ldab,
                    black_box(&lu),
                    ldab,
                    black_box(&ipiv),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_factor(c: &mut Criterion) {
    let mut group = c.benchmark_group("gbtf2");

    for size in [128, 512] {
        let dims = BandDims::square(size, 8, 8);
        let ldab = dims.band_rows();
        let mut a = vec![Complex64::new(0.0, 0.0); ldab * dims.n];
        fill_uniform(2, 0, &mut a);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut lu = a.clone();
                let mut ipiv = vec![0; dims.min_mn()];
                gbtf2(black_box(&dims), &mut lu, ldab, &mut ipiv).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_residual, bench_factor);
criterion_main!(benches);
