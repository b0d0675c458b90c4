#![allow(dead_code)]

use fftwtools::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn random_real(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect()
}

pub fn random_complex(n: usize, seed: u64) -> Vec<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
        .collect()
}

pub fn to_rustfft(v: &[Complex64]) -> Vec<rustfft::num_complex::Complex64> {
    v.iter()
        .map(|c| rustfft::num_complex::Complex64::new(c.re, c.im))
        .collect()
}

pub fn from_rustfft(v: &[rustfft::num_complex::Complex64]) -> Vec<Complex64> {
    v.iter().map(|c| Complex64::new(c.re, c.im)).collect()
}

/// Reference forward/backward DFT computed by rustfft.
pub fn reference_fft(input: &[Complex64], inverse: bool) -> Vec<Complex64> {
    let mut planner = rustfft::FftPlanner::<f64>::new();
    let plan = if inverse {
        planner.plan_fft_inverse(input.len())
    } else {
        planner.plan_fft_forward(input.len())
    };
    let mut buf = to_rustfft(input);
    plan.process(&mut buf);
    from_rustfft(&buf)
}

/// Reference half spectrum computed by realfft.
pub fn reference_rfft(input: &[f64]) -> Vec<Complex64> {
    let mut planner = realfft::RealFftPlanner::<f64>::new();
    let plan = planner.plan_fft_forward(input.len());
    let mut data = input.to_vec();
    let mut out = plan.make_output_vec();
    plan.process(&mut data, &mut out).unwrap();
    from_rustfft(&out)
}

pub fn assert_close(a: &[Complex64], b: &[Complex64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let err = (*x - *y).norm();
        assert!(err <= tol, "bin {i}: {:?} vs {:?} (err {err})", x, y);
    }
}

pub fn assert_close_real(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!((x - y).abs() <= tol, "sample {i}: {x} vs {y}");
    }
}

pub const ALL_EFFORTS: [fftwtools::Effort; 4] = [
    fftwtools::Effort::Estimate,
    fftwtools::Effort::Measure,
    fftwtools::Effort::Patient,
    fftwtools::Effort::Exhaustive,
];
