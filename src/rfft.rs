//! Real-input transforms: real-to-complex (`rfft`) and complex-to-real
//! (`irfft`) in one dimension.
//!
//! A real signal of length `n` has a Hermitian spectrum, so FFTW only
//! produces the first [`spectrum_len`]`(n)` bins. [`rfft`] can optionally
//! mirror the rest with [`fill_hermitian`].

use crate::effort::Effort;
use crate::fft::FftError;
use crate::ndfft::Shape;
use crate::num::Complex64;
use crate::plan::{plan_and_execute, C2r, R2c};

/// Number of non-redundant bins for a real signal of length `n`.
#[inline]
pub const fn spectrum_len(n: usize) -> usize {
    n / 2 + 1
}

/// Reconstruct the redundant upper half of a length-`n` spectrum in place:
/// `spectrum[i] = conj(spectrum[n - i])` for `i` in `n/2 + 1 .. n`.
pub fn fill_hermitian(spectrum: &mut [Complex64], n: usize) -> Result<(), FftError> {
    if spectrum.len() != n {
        return Err(FftError::MismatchedLengths);
    }
    for i in spectrum_len(n)..n {
        spectrum[i] = spectrum[n - i].conj();
    }
    Ok(())
}

/// Forward real-to-complex transform of `input.len()` samples.
///
/// `output` holds either [`spectrum_len`]`(n)` bins, or all `n` bins when
/// `full_spectrum` is set, in which case the upper half is the conjugate
/// mirror of the lower half.
///
/// At [`Effort::Estimate`] the plan runs directly on `input`, which may be
/// overwritten. Higher efforts plan on a private copy and leave `input`
/// untouched.
pub fn rfft(
    input: &mut [f64],
    output: &mut [Complex64],
    full_spectrum: bool,
    effort: Effort,
) -> Result<(), FftError> {
    let n = input.len();
    let shape = Shape::new(&[n])?;
    let expected = if full_spectrum { n } else { spectrum_len(n) };
    if output.len() != expected {
        return Err(FftError::MismatchedLengths);
    }
    plan_and_execute(
        &R2c,
        &shape,
        1,
        input,
        &mut output[..spectrum_len(n)],
        effort,
    )?;
    if full_spectrum {
        fill_hermitian(output, n)?;
    }
    Ok(())
}

/// Backward complex-to-real transform into `output.len()` samples.
///
/// `input` must hold [`spectrum_len`]`(n)` bins and is overwritten. The
/// result is unnormalized: `irfft(rfft(x)) == n * x`.
pub fn irfft(input: &mut [Complex64], output: &mut [f64]) -> Result<(), FftError> {
    let shape = Shape::new(&[output.len()])?;
    plan_and_execute(&C2r, &shape, 1, input, output, Effort::Estimate)
}

/// Forward transform into a freshly allocated half spectrum; `input` is not
/// modified.
pub fn rfft_vec(input: &[f64], effort: Effort) -> Result<Vec<Complex64>, FftError> {
    let mut scratch = input.to_vec();
    let mut out = vec![Complex64::zero(); spectrum_len(input.len())];
    rfft(&mut scratch, &mut out, false, effort)?;
    Ok(out)
}
