//! One-dimensional complex-to-complex transforms and the crate error type.
//!
//! Transforms are unnormalized: a forward transform followed by a backward
//! transform scales the signal by its length. Complex transforms always plan
//! at [`Effort::Estimate`](crate::Effort::Estimate), so the planner never
//! touches the caller's arrays; FFTW may still use the input as workspace
//! while executing.

use core::ffi::c_int;
use core::fmt;

use crate::effort::Effort;
use crate::ndfft::Shape;
use crate::num::Complex64;
use crate::plan::{plan_and_execute, plan_and_execute_inplace, C2c};

pub(crate) const FFTW_FORWARD: c_int = -1;
pub(crate) const FFTW_BACKWARD: c_int = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// A zero extent or an empty batch.
    EmptyInput,
    /// A buffer length disagrees with the transform geometry.
    MismatchedLengths,
    /// An extent or element count does not fit FFTW's `int` interface.
    InvalidShape,
    /// The scratch copy could not be allocated.
    Allocation,
    /// FFTW returned a null plan.
    PlanFailed,
    /// A malformed argument at the C boundary.
    InvalidValue,
}

impl FftError {
    /// Status code reported through the C interface.
    pub const fn code(self) -> c_int {
        match self {
            FftError::EmptyInput => -1,
            FftError::MismatchedLengths => -2,
            FftError::InvalidShape => -3,
            FftError::Allocation => -4,
            FftError::PlanFailed => -5,
            FftError::InvalidValue => -6,
        }
    }
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "transform has a zero extent or an empty batch"),
            FftError::MismatchedLengths => {
                write!(f, "buffer length does not match the transform geometry")
            }
            FftError::InvalidShape => write!(f, "transform extents exceed the FFTW int range"),
            FftError::Allocation => write!(f, "failed to allocate the scratch buffer"),
            FftError::PlanFailed => write!(f, "FFTW could not create a plan"),
            FftError::InvalidValue => write!(f, "invalid argument"),
        }
    }
}

impl std::error::Error for FftError {}

/// Sign of the exponent in the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    /// Unnormalized inverse.
    Backward,
}

impl Direction {
    /// `true` selects the inverse transform.
    pub const fn from_inverse(inverse: bool) -> Self {
        if inverse {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    pub const fn is_inverse(self) -> bool {
        matches!(self, Direction::Backward)
    }

    pub(crate) const fn sign(self) -> c_int {
        match self {
            Direction::Forward => FFTW_FORWARD,
            Direction::Backward => FFTW_BACKWARD,
        }
    }
}

/// 1-D complex transform of `input.len()` points into `output`.
///
/// `input` may be overwritten.
pub fn fft(
    input: &mut [Complex64],
    output: &mut [Complex64],
    direction: Direction,
) -> Result<(), FftError> {
    let shape = Shape::new(&[input.len()])?;
    plan_and_execute(&C2c(direction), &shape, 1, input, output, Effort::Estimate)
}

/// 1-D complex transform of `data` in place.
pub fn fft_inplace(data: &mut [Complex64], direction: Direction) -> Result<(), FftError> {
    let shape = Shape::new(&[data.len()])?;
    plan_and_execute_inplace(direction, &shape, 1, data)
}

/// Forward transform into a freshly allocated vector; `input` is not modified.
pub fn fft_vec(input: &[Complex64]) -> Result<Vec<Complex64>, FftError> {
    let mut out = input.to_vec();
    fft_inplace(&mut out, Direction::Forward)?;
    Ok(out)
}

/// Backward transform scaled by `1/n`, so `ifft_normalized(fft(x)) == x`.
pub fn ifft_normalized(data: &mut [Complex64]) -> Result<(), FftError> {
    fft_inplace(data, Direction::Backward)?;
    let k = 1.0 / data.len() as f64;
    for c in data.iter_mut() {
        *c = c.scale(k);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_impulse() {
        // FFT of [1, 0, 0, 0] is flat
        let mut input = vec![
            Complex64::new(1.0, 0.0),
            Complex64::zero(),
            Complex64::zero(),
            Complex64::zero(),
        ];
        let mut output = vec![Complex64::zero(); 4];
        fft(&mut input, &mut output, Direction::Forward).unwrap();
        for c in &output {
            assert!((c.re - 1.0).abs() < 1e-12, "re = {}", c.re);
            assert!(c.im.abs() < 1e-12, "im = {}", c.im);
        }
    }

    #[test]
    fn test_fft_all_ones() {
        let mut input = vec![Complex64::new(1.0, 0.0); 8];
        let mut output = vec![Complex64::zero(); 8];
        fft(&mut input, &mut output, Direction::Forward).unwrap();
        assert!((output[0].re - 8.0).abs() < 1e-12);
        for c in &output[1..] {
            assert!(c.norm() < 1e-12);
        }
    }

    #[test]
    fn test_forward_backward_scales_by_n() {
        let mut data = vec![
            Complex64::new(1.0, 0.0),
            Complex64::zero(),
            Complex64::zero(),
            Complex64::zero(),
        ];
        fft_inplace(&mut data, Direction::Forward).unwrap();
        fft_inplace(&mut data, Direction::Backward).unwrap();
        assert!((data[0].re - 4.0).abs() < 1e-12);
        for c in &data[1..] {
            assert!(c.norm() < 1e-12);
        }
    }

    #[test]
    fn test_normalized_roundtrip() {
        let orig: Vec<Complex64> = (0..7)
            .map(|i| Complex64::new(i as f64, -(i as f64) * 0.5))
            .collect();
        let mut data = fft_vec(&orig).unwrap();
        ifft_normalized(&mut data).unwrap();
        for (a, b) in data.iter().zip(orig.iter()) {
            assert!((*a - *b).norm() < 1e-12, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_fft_empty() {
        let mut input: Vec<Complex64> = vec![];
        let mut output: Vec<Complex64> = vec![];
        assert_eq!(
            fft(&mut input, &mut output, Direction::Forward),
            Err(FftError::EmptyInput)
        );
    }

    #[test]
    fn test_fft_mismatched_lengths() {
        let mut input = vec![Complex64::new(1.0, 0.0); 2];
        let mut output = vec![Complex64::zero(); 3];
        assert_eq!(
            fft(&mut input, &mut output, Direction::Forward),
            Err(FftError::MismatchedLengths)
        );
    }

    #[test]
    fn test_direction_flag() {
        assert_eq!(Direction::from_inverse(true), Direction::Backward);
        assert_eq!(Direction::from_inverse(false), Direction::Forward);
        assert_eq!(Direction::Forward.sign(), -1);
        assert_eq!(Direction::Backward.sign(), 1);
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let all = [
            FftError::EmptyInput,
            FftError::MismatchedLengths,
            FftError::InvalidShape,
            FftError::Allocation,
            FftError::PlanFailed,
            FftError::InvalidValue,
        ];
        for (i, a) in all.iter().enumerate() {
            assert!(a.code() < 0);
            assert!(!a.to_string().is_empty());
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
