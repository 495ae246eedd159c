//! Static soft-knee gain computer.
//!
//! Maps an input level in dB to the desired output level in dB. Stateless:
//! the result depends only on the input level and the threshold, ratio and
//! knee of the current block.
//!
//! # Curve
//!
//! With `over = xg - threshold` and `width = (knee - 0.99) · 6`:
//!
//! ```text
//! 2·over < -width     →  yg = xg
//! 2·|over| <= width   →  yg = xg + (1/ratio - 1)·(over + width/2)² / (2·width)
//! 2·over > width      →  yg = threshold + over / ratio
//! ```
//!
//! A width at or below [`KNEE_EPSILON`] (this includes every knee below
//! 0.99 dB) is a hard knee: no compression up to the threshold, the full
//! ratio above it.

use crate::params::CompressorParams;

/// Widths at or below this are treated as a hard knee.
pub const KNEE_EPSILON: f32 = 1e-6;

/// Knee control value that produces a zero-width knee.
const KNEE_OFFSET_DB: f32 = 0.99;

/// Scale from the knee control to the knee width in dB.
const KNEE_SCALE: f32 = 6.0;

/// Knee width in dB for a knee control value in dB.
#[inline]
pub fn knee_width(knee_db: f32) -> f32 {
    (knee_db - KNEE_OFFSET_DB) * KNEE_SCALE
}

/// Gain computer for one block of processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainComputer {
    threshold_db: f32,
    ratio: f32,
    width: f32,
}

impl GainComputer {
    /// Create a gain computer from threshold (dB), ratio and knee (dB).
    pub fn new(threshold_db: f32, ratio: f32, knee_db: f32) -> Self {
        Self {
            threshold_db,
            ratio,
            width: knee_width(knee_db),
        }
    }

    /// Create a gain computer from the static part of a parameter set.
    pub fn from_params(params: &CompressorParams) -> Self {
        Self::new(params.threshold_db, params.ratio, params.knee_db)
    }

    /// Threshold in dB.
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Compression ratio.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Knee width in dB (may be negative for knee values below 0.99).
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns `true` when the knee is too narrow for the quadratic branch.
    #[inline]
    pub fn is_hard_knee(&self) -> bool {
        self.width <= KNEE_EPSILON
    }

    /// Output level in dB for an input level `xg` in dB.
    #[inline]
    pub fn output_db(&self, xg: f32) -> f32 {
        let over = xg - self.threshold_db;

        if self.is_hard_knee() {
            return if over <= 0.0 {
                xg
            } else {
                self.threshold_db + over / self.ratio
            };
        }

        let width = self.width;
        if 2.0 * over < -width {
            xg
        } else if 2.0 * over.abs() <= width {
            let knee_pos = over + width / 2.0;
            xg + (1.0 / self.ratio - 1.0) * knee_pos * knee_pos / (2.0 * width)
        } else {
            self.threshold_db + over / self.ratio
        }
    }

    /// Instantaneous gain reduction in dB (`xg - yg`, non-negative for ratio >= 1).
    #[inline]
    pub fn reduction_db(&self, xg: f32) -> f32 {
        xg - self.output_db(xg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soft() -> GainComputer {
        // width = (3 - 0.99) * 6 = 12.06 dB
        GainComputer::new(-20.0, 4.0, 3.0)
    }

    #[test]
    fn test_width() {
        assert!((knee_width(3.0) - 12.06).abs() < 1e-4);
        assert_eq!(knee_width(0.99), 0.0);
        assert!(knee_width(0.0) < 0.0);
    }

    #[test]
    fn test_below_knee_is_identity() {
        let gc = soft();
        let lower = gc.threshold_db() - gc.width() / 2.0;
        for xg in [-160.0, -80.0, -40.0, lower - 0.01, lower] {
            assert_eq!(gc.output_db(xg), xg, "xg = {xg}");
        }
    }

    #[test]
    fn test_above_knee_is_linear() {
        let gc = soft();
        let upper = gc.threshold_db() + gc.width() / 2.0;
        for xg in [upper + 0.01, -5.0, 0.0, 12.0] {
            let expected = -20.0 + (xg + 20.0) / 4.0;
            assert!((gc.output_db(xg) - expected).abs() < 1e-5, "xg = {xg}");
        }
    }

    #[test]
    fn test_knee_edges_are_continuous() {
        let gc = soft();
        let upper = gc.threshold_db() + gc.width() / 2.0;
        let inside = gc.output_db(upper);
        let outside = gc.threshold_db() + (upper - gc.threshold_db()) / gc.ratio();
        assert!((inside - outside).abs() < 1e-4);
    }

    #[test]
    fn test_compresses_at_threshold() {
        let gc = soft();
        assert!(gc.output_db(-20.0) < -20.0);
        assert!(gc.reduction_db(-20.0) > 0.0);
    }

    #[test]
    fn test_unity_ratio_is_transparent() {
        let gc = GainComputer::new(-20.0, 1.0, 6.0);
        for xg in [-60.0, -25.0, -20.0, -15.0, 0.0] {
            assert!((gc.output_db(xg) - xg).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_width_is_hard_knee() {
        let gc = GainComputer::new(-10.0, 2.0, 0.99);
        assert!(gc.is_hard_knee());
        assert_eq!(gc.output_db(-10.0), -10.0);
        assert_eq!(gc.output_db(-30.0), -30.0);
        assert!((gc.output_db(0.0) - (-5.0)).abs() < 1e-6);
        assert!(gc.output_db(-10.0).is_finite());
    }

    #[test]
    fn test_negative_width_is_hard_knee() {
        let gc = GainComputer::new(-10.0, 2.0, 0.0);
        assert!(gc.is_hard_knee());
        assert_eq!(gc.output_db(-11.0), -11.0);
        assert!((gc.output_db(-8.0) - (-9.0)).abs() < 1e-6);
    }
}
