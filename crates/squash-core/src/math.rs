//! Level conversion and numeric-safety helpers.
//!
//! Everything in the gain loop runs in the decibel domain. These functions
//! move samples in and out of it and keep the feedback state free of
//! subnormals, NaN and infinities.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Numeric Safety
//!
//! - [`sanitize_denormal`] - Force any non-normal value to exactly zero
//!
//! # Time Constants
//!
//! - [`time_constant_coeff`] - One-pole coefficient for a time in milliseconds

use libm::{expf, log10f};

/// Level reported for a sample that is exactly zero.
///
/// `log10(0)` is `-inf`; the detector works with this finite floor instead.
pub const LEVEL_FLOOR_DB: f32 = -160.0;

/// Convert decibels to linear gain.
///
/// Computed as `exp(dB / 20 · ln 10)`.
///
/// # Example
/// ```rust
/// use squash_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(-6.0206) - 0.5).abs() < 1e-3);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert a linear amplitude to decibels.
///
/// The sign of the input is ignored. A literal `0.0` (either sign) maps to
/// [`LEVEL_FLOOR_DB`] instead of `-inf`.
///
/// # Example
/// ```rust
/// use squash_core::{LEVEL_FLOOR_DB, linear_to_db};
///
/// assert!((linear_to_db(-1.0)).abs() < 1e-6);
/// assert_eq!(linear_to_db(0.0), LEVEL_FLOOR_DB);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear == 0.0 {
        LEVEL_FLOOR_DB
    } else {
        20.0 * log10f(linear.abs())
    }
}

/// Replace any value that is not a normal float with `0.0`.
///
/// Subnormals, `±0.0`, NaN and `±inf` all become exactly `0.0`; every normal
/// value passes through unchanged. Applied to every value that is fed back
/// into the detector, on every sample.
///
/// # Example
/// ```rust
/// use squash_core::sanitize_denormal;
///
/// assert_eq!(sanitize_denormal(1e-40), 0.0);
/// assert_eq!(sanitize_denormal(f32::NAN), 0.0);
/// assert_eq!(sanitize_denormal(1.0), 1.0);
/// ```
#[inline]
pub fn sanitize_denormal(value: f32) -> f32 {
    if value.is_normal() { value } else { 0.0 }
}

/// One-pole smoothing coefficient for a time constant.
///
/// `coeff = exp(-1000 / (time_ms · sample_rate))`. The result is only
/// meaningful for positive `time_ms` and `sample_rate`.
#[inline]
pub fn time_constant_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    expf(-1000.0 / (time_ms * sample_rate))
}
