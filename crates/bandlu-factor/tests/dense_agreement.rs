//! Band factors agree with nalgebra's dense LU and across batch layouts.

use bandlu_core::{BandDims, factored_band_to_dense, fill_uniform, original_band_to_dense};
use bandlu_factor::{BackendSelector, BackendType, BandLuFactorizer, ParallelBandLu, ParallelConfig};
use nalgebra::DMatrix;
use num_complex::Complex64;

fn random_band(dims: &BandDims, seed: u64) -> Vec<f64> {
    let mut ab = vec![0.0; dims.band_rows() * dims.n];
    fill_uniform(seed, 0, &mut ab);
    ab
}

fn upper(m: &DMatrix<f64>, rows: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, m.ncols(), |i, j| if i <= j { m[(i, j)] } else { 0.0 })
}

#[test]
fn upper_factor_matches_dense_lu() {
    for (n, kl, ku) in [(10, 2, 2), (25, 4, 1), (17, 1, 5), (12, 0, 3)] {
        let dims = BandDims::square(n, kl, ku);
        let ldab = dims.band_rows();
        let ab = random_band(&dims, 42);
        let dense = original_band_to_dense(&dims, &ab, ldab).unwrap();

        let mut lub = ab.clone();
        let mut ipiv = vec![0; n];
        let info = bandlu_factor::gbtf2(&dims, &mut lub, ldab, &mut ipiv).unwrap();
        assert_eq!(info, 0);

        let packed = factored_band_to_dense(&dims, &lub, ldab).unwrap();
        let u_band = upper(&packed, n);
        let u_dense = dense.lu().u();

        let diff = (&u_band - &u_dense).norm();
        assert!(
            diff <= 1e-12 * u_dense.norm(),
            "{}: ||U_band - U_dense|| = {:e}",
            dims,
            diff
        );
    }
}

#[test]
fn determinant_matches_dense() {
    let dims = BandDims::square(15, 3, 2);
    let ldab = dims.band_rows();
    let ab = random_band(&dims, 7);
    let dense = original_band_to_dense(&dims, &ab, ldab).unwrap();

    let mut lub = ab.clone();
    let mut ipiv = vec![0; dims.n];
    bandlu_factor::gbtf2(&dims, &mut lub, ldab, &mut ipiv).unwrap();

    let packed = factored_band_to_dense(&dims, &lub, ldab).unwrap();
    let swaps = ipiv
        .iter()
        .enumerate()
        .filter(|&(i, &p)| p as usize != i + 1)
        .count();
    let sign = if swaps % 2 == 0 { 1.0 } else { -1.0 };
    let det_band = sign * packed.diagonal().product();

    let det_dense = dense.determinant();
    assert!(
        (det_band - det_dense).abs() <= 1e-10 * det_dense.abs(),
        "band {} vs dense {}",
        det_band,
        det_dense
    );
}

#[test]
fn strided_batch_matches_one_at_a_time() {
    let dims = BandDims::new(30, 28, 3, 2);
    let batch = 5;
    let ldab = dims.band_rows() + 3;
    let stride_a = ldab * dims.n + 7;
    let stride_piv = dims.min_mn() + 1;

    let mut ab = vec![Complex64::new(0.0, 0.0); stride_a * batch];
    for k in 0..batch {
        fill_uniform(99, k as u64, &mut ab[k * stride_a..(k + 1) * stride_a]);
    }
    let original = ab.clone();

    let mut ipiv = vec![0; stride_piv * batch];
    let mut info = vec![-7; batch];
    let parallel = ParallelBandLu::new(ParallelConfig::default().with_min_parallel(1));
    parallel
        .factor_batched_strided(
            &dims,
            &mut ab[..],
            ldab,
            stride_a,
            &mut ipiv,
            stride_piv,
            &mut info,
            batch,
        )
        .unwrap();
    assert!(info.iter().all(|&s| s == 0));

    let reference = BackendSelector::prefer(BackendType::Reference).create_factorizer::<Complex64>();
    for k in 0..batch {
        let mut a = original[k * stride_a..k * stride_a + ldab * dims.n].to_vec();
        let mut p = vec![0; dims.min_mn()];
        reference.factor(&dims, &mut a[..], ldab, &mut p).unwrap();

        assert_eq!(&ab[k * stride_a..k * stride_a + ldab * dims.n], &a[..]);
        assert_eq!(
            &ipiv[k * stride_piv..k * stride_piv + dims.min_mn()],
            &p[..]
        );
        // Padding between members is untouched.
        assert_eq!(
            &ab[k * stride_a + ldab * dims.n..(k + 1) * stride_a],
            &original[k * stride_a + ldab * dims.n..(k + 1) * stride_a]
        );
    }
}

#[test]
fn empty_batch_touches_nothing() {
    let dims = BandDims::square(4, 1, 1);
    let mut ab: Vec<f64> = Vec::new();
    let mut ipiv: Vec<i32> = Vec::new();
    let mut info: Vec<i32> = Vec::new();
    ParallelBandLu::default()
        .factor_batched_strided(&dims, &mut ab[..], dims.band_rows(), 0, &mut ipiv, 0, &mut info, 0)
        .unwrap();
}
