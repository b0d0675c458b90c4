//! Batched ("many") 1-D transforms.
//!
//! `m` signals of length `n` are stored back to back: signal `i` occupies
//! elements `i * len .. (i + 1) * len`, where `len` is `n` for time-domain
//! arrays and `n / 2 + 1` for half spectra. One plan is shared across the
//! whole batch.
//!
//! All three forms take an [`Effort`]. Above [`Effort::Estimate`] the whole
//! batch is copied into a scratch buffer after planning, so the caller's input
//! is left untouched.

use crate::effort::Effort;
use crate::fft::{Direction, FftError};
use crate::ndfft::Shape;
use crate::num::Complex64;
use crate::plan::{plan_and_execute, plan_and_execute_inplace, C2c, C2r, R2c};

/// Forward real-to-complex transform of `m` real signals of length `n`.
///
/// `input` holds `n * m` samples and `output` holds `(n / 2 + 1) * m` bins.
pub fn rfft_many(
    n: usize,
    m: usize,
    input: &mut [f64],
    output: &mut [Complex64],
    effort: Effort,
) -> Result<(), FftError> {
    let shape = Shape::new(&[n])?;
    plan_and_execute(&R2c, &shape, m, input, output, effort)
}

/// Backward complex-to-real transform of `m` half spectra into signals of
/// length `n`. Unnormalized.
pub fn irfft_many(
    n: usize,
    m: usize,
    input: &mut [Complex64],
    output: &mut [f64],
    effort: Effort,
) -> Result<(), FftError> {
    let shape = Shape::new(&[n])?;
    plan_and_execute(&C2r, &shape, m, input, output, effort)
}

/// Complex transform of `m` signals of length `n`.
pub fn fft_many(
    n: usize,
    m: usize,
    input: &mut [Complex64],
    output: &mut [Complex64],
    direction: Direction,
    effort: Effort,
) -> Result<(), FftError> {
    let shape = Shape::new(&[n])?;
    plan_and_execute(&C2c(direction), &shape, m, input, output, effort)
}

/// Complex transform of `m` signals of length `n`, results written back
/// into `data`.
///
/// At [`Effort::Estimate`] this is a true in-place plan. Higher efforts would
/// clobber `data` while planning, so the batch is copied out first and
/// transformed back into `data`.
pub fn fft_many_inplace(
    n: usize,
    m: usize,
    data: &mut [Complex64],
    direction: Direction,
    effort: Effort,
) -> Result<(), FftError> {
    let shape = Shape::new(&[n])?;
    if !effort.overwrites_buffers() {
        return plan_and_execute_inplace(direction, &shape, m, data);
    }
    let mut input = Vec::new();
    input
        .try_reserve_exact(data.len())
        .map_err(|_| FftError::Allocation)?;
    input.extend_from_slice(data);
    plan_and_execute(&C2c(direction), &shape, m, &mut input, data, effort)
}
