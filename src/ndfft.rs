//! Multi-dimensional transforms (2D, 3D and arbitrary rank).
//!
//! Arrays are row-major: the last extent varies fastest. Real-to-complex
//! output keeps `n_last / 2 + 1` bins along the last axis. All of these plan
//! at estimate effort and never copy the input.

use core::ffi::c_int;

use crate::effort::Effort;
use crate::fft::{Direction, FftError};
use crate::num::Complex64;
use crate::plan::{plan_and_execute, plan_and_execute_inplace, C2c, R2c};

/// Validated extents of one signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    len: usize,
}

impl Shape {
    /// Every extent must be positive and the total element count must fit a
    /// C `int`.
    pub fn new(dims: &[usize]) -> Result<Self, FftError> {
        if dims.is_empty() {
            return Err(FftError::InvalidShape);
        }
        if dims.contains(&0) {
            return Err(FftError::EmptyInput);
        }
        let len = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .filter(|&n| n <= c_int::MAX as usize)
            .ok_or(FftError::InvalidShape)?;
        Ok(Self {
            dims: dims.to_vec(),
            len,
        })
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of elements in the real or complex time-domain array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: [`Shape::new`] rejects zero extents.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of complex bins produced by a real-to-complex transform.
    pub fn spectrum_len(&self) -> usize {
        match self.dims.split_last() {
            Some((last, outer)) => outer.iter().product::<usize>() * (last / 2 + 1),
            None => 0,
        }
    }

    pub(crate) fn c_dims(&self) -> Result<Vec<c_int>, FftError> {
        self.dims
            .iter()
            .map(|&d| c_int::try_from(d).map_err(|_| FftError::InvalidShape))
            .collect()
    }
}

/// 2D complex transform of a `rows x cols` array.
pub fn fft2d(
    rows: usize,
    cols: usize,
    input: &mut [Complex64],
    output: &mut [Complex64],
    direction: Direction,
) -> Result<(), FftError> {
    fftn(&[rows, cols], input, output, direction)
}

/// 3D complex transform of a `depth x rows x cols` array.
pub fn fft3d(
    depth: usize,
    rows: usize,
    cols: usize,
    input: &mut [Complex64],
    output: &mut [Complex64],
    direction: Direction,
) -> Result<(), FftError> {
    fftn(&[depth, rows, cols], input, output, direction)
}

/// Complex transform of arbitrary rank.
pub fn fftn(
    dims: &[usize],
    input: &mut [Complex64],
    output: &mut [Complex64],
    direction: Direction,
) -> Result<(), FftError> {
    let shape = Shape::new(dims)?;
    plan_and_execute(&C2c(direction), &shape, 1, input, output, Effort::Estimate)
}

/// Complex transform of arbitrary rank, in place.
pub fn fftn_inplace(
    dims: &[usize],
    data: &mut [Complex64],
    direction: Direction,
) -> Result<(), FftError> {
    let shape = Shape::new(dims)?;
    plan_and_execute_inplace(direction, &shape, 1, data)
}

/// 2D real-to-complex transform; `output` holds `rows * (cols / 2 + 1)` bins.
pub fn rfft2d(
    rows: usize,
    cols: usize,
    input: &mut [f64],
    output: &mut [Complex64],
) -> Result<(), FftError> {
    rfftn(&[rows, cols], input, output)
}

/// 3D real-to-complex transform; `output` holds
/// `depth * rows * (cols / 2 + 1)` bins.
pub fn rfft3d(
    depth: usize,
    rows: usize,
    cols: usize,
    input: &mut [f64],
    output: &mut [Complex64],
) -> Result<(), FftError> {
    rfftn(&[depth, rows, cols], input, output)
}

/// Real-to-complex transform of arbitrary rank.
pub fn rfftn(dims: &[usize], input: &mut [f64], output: &mut [Complex64]) -> Result<(), FftError> {
    let shape = Shape::new(dims)?;
    plan_and_execute(&R2c, &shape, 1, input, output, Effort::Estimate)
}
