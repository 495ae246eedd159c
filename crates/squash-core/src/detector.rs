//! Two-stage attack/release level detector.
//!
//! Smooths the instantaneous gain reduction `xl` (dB) produced by the gain
//! computer into the gain-reduction trajectory that is actually applied.
//!
//! ```text
//! y1 = max(xl, release·old_y1 + (1 - release)·xl)     release stage
//! yl = attack·old_yl + (1 - attack)·y1                attack stage
//! ```
//!
//! The release stage follows any increase of `xl` immediately and decays
//! with the release time constant. The attack stage is a one-pole lowpass
//! over the release stage, so rising reduction is slewed by the attack time.
//!
//! Both carried states pass through [`sanitize_denormal`] before use and
//! after every update.

use crate::math::{db_to_linear, sanitize_denormal, time_constant_coeff};

/// Attack and release coefficients for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    attack: f32,
    release: f32,
}

impl Ballistics {
    /// Compute coefficients from times in milliseconds.
    pub fn new(attack_ms: f32, release_ms: f32, sample_rate: f32) -> Self {
        Self {
            attack: time_constant_coeff(attack_ms, sample_rate),
            release: time_constant_coeff(release_ms, sample_rate),
        }
    }

    /// Attack coefficient in `(0, 1)`.
    pub fn attack_coeff(&self) -> f32 {
        self.attack
    }

    /// Release coefficient in `(0, 1)`.
    pub fn release_coeff(&self) -> f32 {
        self.release
    }
}

/// Feedback state of one detector.
///
/// # Example
///
/// ```rust
/// use squash_core::{Ballistics, Detector};
///
/// let ballistics = Ballistics::new(10.0, 80.0, 48000.0);
/// let mut detector = Detector::new();
///
/// // 6 dB of instantaneous reduction, held
/// let mut level = 0.0;
/// for _ in 0..48000 {
///     level = detector.process(6.0, &ballistics);
/// }
/// assert!((level - 6.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Detector {
    /// Smoothed gain reduction (dB)
    old_yl: f32,
    /// Release stage output (dB)
    old_y1: f32,
}

impl Detector {
    /// Detector with zeroed state.
    pub const fn new() -> Self {
        Self {
            old_yl: 0.0,
            old_y1: 0.0,
        }
    }

    /// Detector starting from explicit state (smoothed level, release stage).
    ///
    /// Values are stored as given; they are sanitized on the next
    /// [`process`](Self::process) call.
    pub const fn from_state(level_db: f32, release_db: f32) -> Self {
        Self {
            old_yl: level_db,
            old_y1: release_db,
        }
    }

    /// Advance by one sample with instantaneous reduction `xl` (dB).
    ///
    /// Returns the new smoothed reduction in dB.
    #[inline]
    pub fn process(&mut self, xl: f32, ballistics: &Ballistics) -> f32 {
        let old_y1 = sanitize_denormal(self.old_y1);
        let old_yl = sanitize_denormal(self.old_yl);

        let release = ballistics.release;
        let attack = ballistics.attack;

        let y1 = sanitize_denormal(xl.max(release * old_y1 + (1.0 - release) * xl));
        let yl = sanitize_denormal(attack * old_yl + (1.0 - attack) * y1);

        self.old_y1 = y1;
        self.old_yl = yl;
        yl
    }

    /// Current smoothed gain reduction in dB.
    #[inline]
    pub fn level(&self) -> f32 {
        self.old_yl
    }

    /// Current release-stage level in dB.
    #[inline]
    pub fn release_level(&self) -> f32 {
        self.old_y1
    }

    /// Linear gain for the current smoothed reduction.
    #[inline]
    pub fn gain(&self) -> f32 {
        db_to_linear(-self.old_yl)
    }

    /// Zero both states.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
