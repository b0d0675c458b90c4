//! # fftwtools - FFTW transforms behind a small, checked Rust surface
//!
//! Real and complex discrete Fourier transforms in 1, 2, 3 and N dimensions,
//! plus batched ("many") transforms over a matrix of signals, all planned and
//! executed by [FFTW](https://www.fftw.org). Each call builds a plan, runs it
//! once and releases it; nothing is cached between calls.
//!
//! ## Planner effort
//!
//! Real-to-complex and batched transforms take an [`Effort`]. At
//! [`Effort::Estimate`] FFTW guesses an algorithm without touching the
//! arrays. Higher levels time candidate algorithms on the arrays themselves,
//! so those calls plan against a private scratch copy and only then copy the
//! caller's input in. The caller's input survives such calls unchanged.
//!
//! ## Normalization
//!
//! Transforms are unnormalized: forward then backward scales by the number of
//! elements transformed.
//!
//! ## Threads
//!
//! FFTW's planner is not thread-safe. Plan creation and destruction are
//! serialized behind a process-wide lock; execution is not, so transforms on
//! disjoint buffers run concurrently.
//!
//! ## Cargo Features
//!
//! - `capi` (default): export the pointer-based C entry points in [`capi`]
//! - `source` (default): build FFTW from source through `fftw-sys`
//! - `system-fftw`: link the system `libfftw3` instead
//!
//! ## Example
//!
//! ```
//! use fftwtools::{rfft, Complex64, Effort};
//!
//! let mut signal = vec![1.0, 0.0, 1.0, 0.0];
//! let mut spectrum = vec![Complex64::zero(); 3];
//! rfft::rfft(&mut signal, &mut spectrum, false, Effort::Estimate).unwrap();
//! assert!((spectrum[0].re - 2.0).abs() < 1e-12);
//! ```

/// One-dimensional complex transforms and the [`FftError`] type.
pub mod fft;

/// Real-to-complex and complex-to-real transforms in one dimension.
pub mod rfft;

/// Multi-dimensional transforms and the [`Shape`] geometry type.
pub mod ndfft;

/// Batched transforms sharing one plan across many signals.
pub mod batch;

/// Planner effort levels and the configured default.
pub mod effort;

pub mod num;

#[cfg(feature = "capi")]
pub mod capi;

mod plan;

pub use effort::{default_effort, set_default_effort, Effort, EFFORT_ENV};
pub use fft::{Direction, FftError};
pub use ndfft::Shape;
pub use num::Complex64;
