//! C entry points for in-process hosts.
//!
//! Every argument arrives by pointer, the way an interpreter's foreign
//! function interface passes vectors. `fftw_complex` arrays are passed as
//! [`Complex64`], which has the same layout. Each function returns `0` on
//! success or the negative [`FftError::code`] of the failure; callers that
//! ignore the return value keep working.
//!
//! Input and output may be the same array for complex-to-complex transforms,
//! which then run in place. Any other overlap is rejected.

use core::ffi::c_int;
use core::mem::size_of;
use core::slice;

use crate::batch;
use crate::effort::Effort;
use crate::fft::{Direction, FftError};
use crate::ndfft;
use crate::num::Complex64;
use crate::rfft::{self, spectrum_len};

unsafe fn read_int(p: *const c_int) -> Result<c_int, FftError> {
    if p.is_null() {
        return Err(FftError::InvalidValue);
    }
    Ok(*p)
}

unsafe fn read_len(p: *const c_int) -> Result<usize, FftError> {
    usize::try_from(read_int(p)?).map_err(|_| FftError::InvalidValue)
}

unsafe fn read_flag(p: *const c_int) -> Result<bool, FftError> {
    Ok(read_int(p)? == 1)
}

unsafe fn read_direction(p: *const c_int) -> Result<Direction, FftError> {
    Ok(Direction::from_inverse(read_flag(p)?))
}

unsafe fn read_effort(p: *const c_int) -> Result<Effort, FftError> {
    Ok(Effort::from_code(read_int(p)?))
}

unsafe fn slice_mut<'a, T>(p: *mut T, len: usize) -> Result<&'a mut [T], FftError> {
    if len == 0 {
        return Ok(&mut []);
    }
    if p.is_null() {
        return Err(FftError::InvalidValue);
    }
    Ok(slice::from_raw_parts_mut(p, len))
}

fn overlaps<A, B>(a: *const A, a_len: usize, b: *const B, b_len: usize) -> bool {
    let (a0, b0) = (a as usize, b as usize);
    let a1 = a0.saturating_add(a_len.saturating_mul(size_of::<A>()));
    let b1 = b0.saturating_add(b_len.saturating_mul(size_of::<B>()));
    a0 < b1 && b0 < a1
}

fn checked_total(a: usize, b: usize) -> Result<usize, FftError> {
    a.checked_mul(b).ok_or(FftError::InvalidShape)
}

fn status(name: &str, result: Result<(), FftError>) -> c_int {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{name}: {e}");
            e.code()
        }
    }
}

unsafe fn real_to_complex<'a>(
    data: *mut f64,
    n: usize,
    res: *mut Complex64,
    res_len: usize,
) -> Result<(&'a mut [f64], &'a mut [Complex64]), FftError> {
    if overlaps(data, n, res, res_len) {
        return Err(FftError::InvalidValue);
    }
    Ok((slice_mut(data, n)?, slice_mut(res, res_len)?))
}

unsafe fn complex_to_real<'a>(
    data: *mut Complex64,
    data_len: usize,
    res: *mut f64,
    n: usize,
) -> Result<(&'a mut [Complex64], &'a mut [f64]), FftError> {
    if overlaps(data, data_len, res, n) {
        return Err(FftError::InvalidValue);
    }
    Ok((slice_mut(data, data_len)?, slice_mut(res, n)?))
}

/// Complex transform with geometry `dims`, in place when the arrays coincide.
unsafe fn complex_to_complex(
    dims: &[usize],
    data: *mut Complex64,
    res: *mut Complex64,
    direction: Direction,
) -> Result<(), FftError> {
    let len = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(FftError::InvalidShape)?;
    if data == res {
        return ndfft::fftn_inplace(dims, slice_mut(data, len)?, direction);
    }
    if overlaps(data, len, res, len) {
        return Err(FftError::InvalidValue);
    }
    ndfft::fftn(dims, slice_mut(data, len)?, slice_mut(res, len)?, direction)
}

/// 1-D real-to-complex. `res` holds `n/2 + 1` bins, or `n` when
/// `*ret_herm_conj == 1`.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_r2c(
    n: *const c_int,
    data: *mut f64,
    res: *mut Complex64,
    ret_herm_conj: *const c_int,
    fftwplanopt: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let n = read_len(n)?;
        let full = read_flag(ret_herm_conj)?;
        let effort = read_effort(fftwplanopt)?;
        let res_len = if full { n } else { spectrum_len(n) };
        let (input, output) = real_to_complex(data, n, res, res_len)?;
        rfft::rfft(input, output, full, effort)
    };
    status("cfft_r2c", run())
}

/// 1-D complex-to-real, always at estimate effort.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_c2r(n: *const c_int, data: *mut Complex64, res: *mut f64) -> c_int {
    let run = || -> Result<(), FftError> {
        let n = read_len(n)?;
        let (input, output) = complex_to_real(data, spectrum_len(n), res, n)?;
        rfft::irfft(input, output)
    };
    status("cfft_c2r", run())
}

/// 1-D complex-to-complex; `*inverse == 1` selects the backward transform.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_c2c(
    n: *const c_int,
    data: *mut Complex64,
    res: *mut Complex64,
    inverse: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let n = read_len(n)?;
        complex_to_complex(&[n], data, res, read_direction(inverse)?)
    };
    status("cfft_c2c", run())
}

/// Batched real-to-complex over `m` signals of length `n`.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cmvfft_r2c(
    n: *const c_int,
    m: *const c_int,
    data: *mut f64,
    res: *mut Complex64,
    fftwplanopt: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let (n, m) = (read_len(n)?, read_len(m)?);
        let effort = read_effort(fftwplanopt)?;
        let (input, output) = real_to_complex(
            data,
            checked_total(n, m)?,
            res,
            checked_total(spectrum_len(n), m)?,
        )?;
        batch::rfft_many(n, m, input, output, effort)
    };
    status("cmvfft_r2c", run())
}

/// Batched complex-to-real over `m` half spectra.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cmvfft_c2r(
    n: *const c_int,
    m: *const c_int,
    data: *mut Complex64,
    res: *mut f64,
    fftwplanopt: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let (n, m) = (read_len(n)?, read_len(m)?);
        let effort = read_effort(fftwplanopt)?;
        let (input, output) = complex_to_real(
            data,
            checked_total(spectrum_len(n), m)?,
            res,
            checked_total(n, m)?,
        )?;
        batch::irfft_many(n, m, input, output, effort)
    };
    status("cmvfft_c2r", run())
}

/// Batched complex-to-complex over `m` signals of length `n`, in place when
/// `data == res`.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cmvfft_c2c(
    n: *const c_int,
    m: *const c_int,
    data: *mut Complex64,
    res: *mut Complex64,
    inverse: *const c_int,
    fftwplanopt: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let (n, m) = (read_len(n)?, read_len(m)?);
        let direction = read_direction(inverse)?;
        let effort = read_effort(fftwplanopt)?;
        let total = checked_total(n, m)?;
        if data == res {
            return batch::fft_many_inplace(n, m, slice_mut(data, total)?, direction, effort);
        }
        if overlaps(data, total, res, total) {
            return Err(FftError::InvalidValue);
        }
        batch::fft_many(
            n,
            m,
            slice_mut(data, total)?,
            slice_mut(res, total)?,
            direction,
            effort,
        )
    };
    status("cmvfft_c2c", run())
}

/// 2D real-to-complex of an `nx x ny` array.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_r2c_2d(
    nx: *const c_int,
    ny: *const c_int,
    data: *mut f64,
    res: *mut Complex64,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let (nx, ny) = (read_len(nx)?, read_len(ny)?);
        let (input, output) = real_to_complex(
            data,
            checked_total(nx, ny)?,
            res,
            checked_total(nx, spectrum_len(ny))?,
        )?;
        ndfft::rfft2d(nx, ny, input, output)
    };
    status("cfft_r2c_2d", run())
}

/// 2D complex-to-complex of an `nx x ny` array.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_c2c_2d(
    nx: *const c_int,
    ny: *const c_int,
    data: *mut Complex64,
    res: *mut Complex64,
    inverse: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let dims = [read_len(nx)?, read_len(ny)?];
        complex_to_complex(&dims, data, res, read_direction(inverse)?)
    };
    status("cfft_c2c_2d", run())
}

/// 3D real-to-complex of an `nx x ny x nz` array.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_r2c_3d(
    nx: *const c_int,
    ny: *const c_int,
    nz: *const c_int,
    data: *mut f64,
    res: *mut Complex64,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let (nx, ny, nz) = (read_len(nx)?, read_len(ny)?, read_len(nz)?);
        let plane = checked_total(nx, ny)?;
        let (input, output) = real_to_complex(
            data,
            checked_total(plane, nz)?,
            res,
            checked_total(plane, spectrum_len(nz))?,
        )?;
        ndfft::rfft3d(nx, ny, nz, input, output)
    };
    status("cfft_r2c_3d", run())
}

/// 3D complex-to-complex of an `nx x ny x nz` array.
///
/// # Safety
/// Every pointer must be valid for the sizes it describes.
#[no_mangle]
pub unsafe extern "C" fn cfft_c2c_3d(
    nx: *const c_int,
    ny: *const c_int,
    nz: *const c_int,
    data: *mut Complex64,
    res: *mut Complex64,
    inverse: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let dims = [read_len(nx)?, read_len(ny)?, read_len(nz)?];
        complex_to_complex(&dims, data, res, read_direction(inverse)?)
    };
    status("cfft_c2c_3d", run())
}

/// Complex-to-complex of rank `*r` with extents `n[0..r]`.
///
/// # Safety
/// `n` must point to `*r` extents, and the arrays must be valid for their
/// product.
#[no_mangle]
pub unsafe extern "C" fn cfft_c2c_xd(
    r: *const c_int,
    n: *const c_int,
    data: *mut Complex64,
    res: *mut Complex64,
    inverse: *const c_int,
) -> c_int {
    let run = || -> Result<(), FftError> {
        let rank = read_len(r)?;
        if rank == 0 || n.is_null() {
            return Err(FftError::InvalidValue);
        }
        let dims = (0..rank)
            .map(|i| read_len(n.add(i)))
            .collect::<Result<Vec<_>, _>>()?;
        complex_to_complex(&dims, data, res, read_direction(inverse)?)
    };
    status("cfft_c2c_xd", run())
}
