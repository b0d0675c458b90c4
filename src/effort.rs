//! Planner effort levels and the process-wide default effort.
//!
//! FFTW's planner flags trade one-time planning cost against execution speed.
//! Everything above [`Effort::Estimate`] lets the planner time real transforms
//! on the arrays it is given, overwriting their contents in the process.

use core::ffi::c_uint;
use core::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

pub(crate) const FFTW_MEASURE: c_uint = 0;
pub(crate) const FFTW_DESTROY_INPUT: c_uint = 1 << 0;
pub(crate) const FFTW_EXHAUSTIVE: c_uint = 1 << 3;
pub(crate) const FFTW_PATIENT: c_uint = 1 << 5;
pub(crate) const FFTW_ESTIMATE: c_uint = 1 << 6;

/// Environment variable holding the default effort code.
///
/// Transforms always take an explicit [`Effort`]; this setting only feeds
/// [`default_effort`] and `Effort::default()`, for callers that want the
/// level chosen at deployment time.
pub const EFFORT_ENV: &str = "FFTWTOOLS_EFFORT";

/// How hard the FFTW planner searches for a fast algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effort {
    /// Heuristic guess. Never touches the arrays while planning.
    Estimate,
    Measure,
    Patient,
    Exhaustive,
}

impl Effort {
    /// Map an integer effort code to a level.
    ///
    /// `<= 0` is [`Effort::Estimate`], `1` is [`Effort::Measure`], `2` is
    /// [`Effort::Patient`], and anything larger clamps to
    /// [`Effort::Exhaustive`].
    pub const fn from_code(code: i32) -> Self {
        match code {
            i32::MIN..=0 => Effort::Estimate,
            1 => Effort::Measure,
            2 => Effort::Patient,
            _ => Effort::Exhaustive,
        }
    }

    /// Canonical integer code, the inverse of [`Effort::from_code`] on `0..=3`.
    pub const fn code(self) -> i32 {
        match self {
            Effort::Estimate => 0,
            Effort::Measure => 1,
            Effort::Patient => 2,
            Effort::Exhaustive => 3,
        }
    }

    /// Whether planning at this level may overwrite the planner's arrays.
    pub const fn overwrites_buffers(self) -> bool {
        !matches!(self, Effort::Estimate)
    }

    /// FFTW planner flags for this level. Input destruction is always allowed.
    pub(crate) const fn flags(self) -> c_uint {
        let effort = match self {
            Effort::Estimate => FFTW_ESTIMATE,
            Effort::Measure => FFTW_MEASURE,
            Effort::Patient => FFTW_PATIENT,
            Effort::Exhaustive => FFTW_EXHAUSTIVE,
        };
        FFTW_DESTROY_INPUT | effort
    }
}

impl From<i32> for Effort {
    fn from(code: i32) -> Self {
        Effort::from_code(code)
    }
}

impl core::fmt::Display for Effort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Effort::Estimate => "estimate",
            Effort::Measure => "measure",
            Effort::Patient => "patient",
            Effort::Exhaustive => "exhaustive",
        };
        f.write_str(name)
    }
}

/// The configured default: runtime override, then `FFTWTOOLS_EFFORT`, then
/// [`Effort::Estimate`].
impl Default for Effort {
    fn default() -> Self {
        default_effort()
    }
}

/// `0` means no override; otherwise `code + 1`.
static DEFAULT_EFFORT_OVERRIDE: AtomicU8 = AtomicU8::new(0);
static ENV_EFFORT: OnceLock<Option<Effort>> = OnceLock::new();

fn env_effort() -> Option<Effort> {
    *ENV_EFFORT.get_or_init(|| {
        let parsed = std::env::var(EFFORT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<i32>().ok())
            .map(Effort::from_code);
        if let Some(effort) = parsed {
            log::debug!("default planner effort from {EFFORT_ENV}: {effort}");
        }
        parsed
    })
}

/// Override the default effort for the whole process.
///
/// Passing `None` reverts to the environment variable or the built-in default.
pub fn set_default_effort(effort: Option<Effort>) {
    let raw = effort.map_or(0, |e| e.code() as u8 + 1);
    DEFAULT_EFFORT_OVERRIDE.store(raw, Ordering::Relaxed);
}

/// Effort used when the caller does not pick one.
pub fn default_effort() -> Effort {
    match DEFAULT_EFFORT_OVERRIDE.load(Ordering::Relaxed) {
        0 => env_effort().unwrap_or(Effort::Estimate),
        raw => Effort::from_code(raw as i32 - 1),
    }
}
