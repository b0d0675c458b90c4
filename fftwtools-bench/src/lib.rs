//! Shared inputs for the fftwtools benchmarks.

/// Deterministic real test signal of length `n`.
pub fn signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            (0.1 * t).sin() + 0.5 * (0.37 * t).cos()
        })
        .collect()
}

/// Deterministic complex test signal of length `n`.
pub fn complex_signal(n: usize) -> Vec<fftwtools::Complex64> {
    signal(n)
        .into_iter()
        .enumerate()
        .map(|(i, x)| fftwtools::Complex64::new(x, -(i as f64 * 0.01)))
        .collect()
}
