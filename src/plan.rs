//! Plan-and-execute core shared by every transform entry point.
//!
//! All transforms go through `fftw_plan_many_dft*`: a single signal is a batch
//! of one. A [`Plan`] owns the native plan and destroys it on drop, and a
//! [`Scratch`] owns the defensive input copy used when the planner is allowed
//! to overwrite its arrays.
//!
//! FFTW's planner keeps global state and is not thread-safe, so creating and
//! destroying plans happens under [`PLANNER`]. `fftw_execute` is thread-safe
//! and runs outside the lock.

use core::ffi::{c_int, c_uint};
use core::ptr;
use std::sync::{Mutex, MutexGuard};

use fftw_sys as ffi;

use crate::effort::Effort;
use crate::fft::{Direction, FftError};
use crate::ndfft::Shape;
use crate::num::Complex64;

static PLANNER: Mutex<()> = Mutex::new(());

fn planner_lock() -> MutexGuard<'static, ()> {
    // The guarded state lives inside FFTW; a panic elsewhere cannot corrupt it.
    PLANNER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A transform family: element types and the FFTW planner that builds it.
pub(crate) trait Kind {
    type In: Copy + Default;
    type Out;

    const NAME: &'static str;

    /// Elements of one input signal.
    fn input_len(shape: &Shape) -> usize;
    /// Elements of one output signal.
    fn output_len(shape: &Shape) -> usize;

    /// # Safety
    /// `n` must point to `rank` extents, and `input`/`output` must be valid
    /// for `howmany * idist` and `howmany * odist` elements.
    #[allow(clippy::too_many_arguments)]
    unsafe fn plan_many(
        &self,
        rank: c_int,
        n: *const c_int,
        howmany: c_int,
        input: *mut Self::In,
        idist: c_int,
        output: *mut Self::Out,
        odist: c_int,
        flags: c_uint,
    ) -> ffi::fftw_plan;
}

/// Complex-to-complex in the given direction.
pub(crate) struct C2c(pub Direction);
/// Real-to-complex, forward only.
pub(crate) struct R2c;
/// Complex-to-real, backward only.
pub(crate) struct C2r;

impl Kind for C2c {
    type In = Complex64;
    type Out = Complex64;
    const NAME: &'static str = "c2c";

    fn input_len(shape: &Shape) -> usize {
        shape.len()
    }
    fn output_len(shape: &Shape) -> usize {
        shape.len()
    }

    unsafe fn plan_many(
        &self,
        rank: c_int,
        n: *const c_int,
        howmany: c_int,
        input: *mut Complex64,
        idist: c_int,
        output: *mut Complex64,
        odist: c_int,
        flags: c_uint,
    ) -> ffi::fftw_plan {
        ffi::fftw_plan_many_dft(
            rank,
            n,
            howmany,
            input.cast(),
            ptr::null(),
            1,
            idist,
            output.cast(),
            ptr::null(),
            1,
            odist,
            self.0.sign(),
            flags,
        )
    }
}

impl Kind for R2c {
    type In = f64;
    type Out = Complex64;
    const NAME: &'static str = "r2c";

    fn input_len(shape: &Shape) -> usize {
        shape.len()
    }
    fn output_len(shape: &Shape) -> usize {
        shape.spectrum_len()
    }

    unsafe fn plan_many(
        &self,
        rank: c_int,
        n: *const c_int,
        howmany: c_int,
        input: *mut f64,
        idist: c_int,
        output: *mut Complex64,
        odist: c_int,
        flags: c_uint,
    ) -> ffi::fftw_plan {
        ffi::fftw_plan_many_dft_r2c(
            rank,
            n,
            howmany,
            input,
            ptr::null(),
            1,
            idist,
            output.cast(),
            ptr::null(),
            1,
            odist,
            flags,
        )
    }
}

impl Kind for C2r {
    type In = Complex64;
    type Out = f64;
    const NAME: &'static str = "c2r";

    fn input_len(shape: &Shape) -> usize {
        shape.spectrum_len()
    }
    fn output_len(shape: &Shape) -> usize {
        shape.len()
    }

    unsafe fn plan_many(
        &self,
        rank: c_int,
        n: *const c_int,
        howmany: c_int,
        input: *mut Complex64,
        idist: c_int,
        output: *mut f64,
        odist: c_int,
        flags: c_uint,
    ) -> ffi::fftw_plan {
        ffi::fftw_plan_many_dft_c2r(
            rank,
            n,
            howmany,
            input.cast(),
            ptr::null(),
            1,
            idist,
            output,
            ptr::null(),
            1,
            odist,
            flags,
        )
    }
}

/// Validated geometry of one planner call: per-signal shape plus batch count.
#[derive(Debug)]
struct Layout {
    dims: Vec<c_int>,
    howmany: c_int,
    idist: c_int,
    odist: c_int,
    input_total: usize,
    output_total: usize,
}

impl Layout {
    fn new<K: Kind>(shape: &Shape, howmany: usize) -> Result<Self, FftError> {
        if howmany == 0 {
            return Err(FftError::EmptyInput);
        }
        let to_c = |v: usize| c_int::try_from(v).map_err(|_| FftError::InvalidShape);
        let per_in = K::input_len(shape);
        let per_out = K::output_len(shape);
        Ok(Self {
            dims: shape.c_dims()?,
            howmany: to_c(howmany)?,
            idist: to_c(per_in)?,
            odist: to_c(per_out)?,
            input_total: per_in.checked_mul(howmany).ok_or(FftError::InvalidShape)?,
            output_total: per_out.checked_mul(howmany).ok_or(FftError::InvalidShape)?,
        })
    }
}

/// Owned FFTW plan, destroyed on drop.
pub(crate) struct Plan {
    raw: ffi::fftw_plan,
}

impl Plan {
    /// # Safety
    /// `input` and `output` must stay valid for the layout's element counts
    /// until the plan is dropped. Above [`Effort::Estimate`] both arrays are
    /// overwritten while planning.
    unsafe fn new<K: Kind>(
        kind: &K,
        layout: &Layout,
        input: *mut K::In,
        output: *mut K::Out,
        effort: Effort,
    ) -> Result<Self, FftError> {
        let raw = {
            let _guard = planner_lock();
            kind.plan_many(
                layout.dims.len() as c_int,
                layout.dims.as_ptr(),
                layout.howmany,
                input,
                layout.idist,
                output,
                layout.odist,
                effort.flags(),
            )
        };
        if raw.is_null() {
            log::warn!(
                "fftw refused {} plan for {:?} x{} at {} effort",
                K::NAME,
                layout.dims,
                layout.howmany,
                effort
            );
            return Err(FftError::PlanFailed);
        }
        log::debug!(
            "planned {} {:?} x{} at {} effort",
            K::NAME,
            layout.dims,
            layout.howmany,
            effort
        );
        Ok(Self { raw })
    }

    /// # Safety
    /// The arrays the plan was created with must still be alive and not
    /// borrowed elsewhere.
    unsafe fn execute(&self) {
        log::trace!("executing plan {:p}", self.raw);
        ffi::fftw_execute(self.raw);
    }
}

impl Drop for Plan {
    fn drop(&mut self) {
        let _guard = planner_lock();
        log::trace!("destroying plan {:p}", self.raw);
        unsafe { ffi::fftw_destroy_plan(self.raw) };
    }
}

/// Call-scoped copy of the caller's input, handed to the planner before it
/// holds any data.
pub(crate) struct Scratch<T> {
    buf: Vec<T>,
}

impl<T: Copy + Default> Scratch<T> {
    pub(crate) fn try_new(len: usize) -> Result<Self, FftError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| {
            log::error!("scratch allocation of {len} elements failed");
            FftError::Allocation
        })?;
        buf.resize(len, T::default());
        Ok(Self { buf })
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Overwrite the whole buffer with `src`.
    fn fill_from(&mut self, src: &[T]) {
        debug_assert_eq!(src.len(), self.buf.len());
        let len = src.len().min(self.buf.len());
        // Raw copy so the pointer already given to the planner stays valid.
        unsafe { ptr::copy_nonoverlapping(src.as_ptr(), self.buf.as_mut_ptr(), len) };
    }
}

/// Plan and run one transform of `howmany` signals of `shape`.
///
/// At [`Effort::Estimate`] the plan is built directly on `input`, which FFTW
/// may clobber during execution. Above that, the plan is built on a scratch
/// buffer that only receives the caller's data once the plan exists, so
/// `input` is left untouched.
pub(crate) fn plan_and_execute<K: Kind>(
    kind: &K,
    shape: &Shape,
    howmany: usize,
    input: &mut [K::In],
    output: &mut [K::Out],
    effort: Effort,
) -> Result<(), FftError> {
    let layout = Layout::new::<K>(shape, howmany)?;
    if input.len() != layout.input_total || output.len() != layout.output_total {
        return Err(FftError::MismatchedLengths);
    }
    let out_ptr = output.as_mut_ptr();
    if effort.overwrites_buffers() {
        let mut scratch = Scratch::try_new(input.len())?;
        log::debug!("using {} element scratch copy", scratch.len());
        unsafe {
            let plan = Plan::new(kind, &layout, scratch.as_mut_ptr(), out_ptr, effort)?;
            scratch.fill_from(input);
            plan.execute();
        }
    } else {
        unsafe {
            let plan = Plan::new(kind, &layout, input.as_mut_ptr(), out_ptr, effort)?;
            plan.execute();
        }
    }
    Ok(())
}

/// Plan and run a complex-to-complex transform in place, at estimate effort.
pub(crate) fn plan_and_execute_inplace(
    direction: Direction,
    shape: &Shape,
    howmany: usize,
    data: &mut [Complex64],
) -> Result<(), FftError> {
    let layout = Layout::new::<C2c>(shape, howmany)?;
    if data.len() != layout.input_total {
        return Err(FftError::MismatchedLengths);
    }
    let ptr = data.as_mut_ptr();
    unsafe {
        let plan = Plan::new(&C2c(direction), &layout, ptr, ptr, Effort::Estimate)?;
        plan.execute();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_distances_follow_kind() {
        let shape = Shape::new(&[6]).unwrap();
        let l = Layout::new::<R2c>(&shape, 3).unwrap();
        assert_eq!((l.idist, l.odist), (6, 4));
        assert_eq!((l.input_total, l.output_total), (18, 12));
        let l = Layout::new::<C2r>(&shape, 3).unwrap();
        assert_eq!((l.idist, l.odist), (4, 6));
        let l = Layout::new::<C2c>(&shape, 2).unwrap();
        assert_eq!((l.idist, l.odist, l.howmany), (6, 6, 2));
    }

    #[test]
    fn layout_rejects_empty_batch() {
        let shape = Shape::new(&[4]).unwrap();
        assert_eq!(
            Layout::new::<C2c>(&shape, 0).unwrap_err(),
            FftError::EmptyInput
        );
    }

    #[test]
    fn layout_rejects_oversized_batch() {
        let shape = Shape::new(&[4]).unwrap();
        assert_eq!(
            Layout::new::<C2c>(&shape, c_int::MAX as usize + 1).unwrap_err(),
            FftError::InvalidShape
        );
    }

    #[test]
    fn scratch_fill_keeps_buffer_address() {
        let mut s = Scratch::<f64>::try_new(4).unwrap();
        let before = s.as_mut_ptr();
        s.fill_from(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.as_mut_ptr(), before);
        assert_eq!(s.buf, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn scratch_reports_allocation_failure() {
        let err = Scratch::<Complex64>::try_new(usize::MAX).err();
        assert_eq!(err, Some(FftError::Allocation));
    }

    #[test]
    fn mismatched_buffers_never_reach_planner() {
        let shape = Shape::new(&[8]).unwrap();
        let mut input = vec![0.0; 8];
        let mut output = vec![Complex64::zero(); 4];
        let err = plan_and_execute(&R2c, &shape, 1, &mut input, &mut output, Effort::Measure);
        assert_eq!(err, Err(FftError::MismatchedLengths));
    }
}
