//! Stereo-link policy.
//!
//! Decides how the left and right instantaneous gain reductions are coupled
//! before smoothing. The `stereolink` parameter selects the policy:
//!
//! | Value | Policy | Detector |
//! |-------|--------|----------|
//! | `0` | [`StereoLink::Uncoupled`] | one per channel |
//! | `(0, 1]` | [`StereoLink::Average`] | one shared |
//! | `> 1` | [`StereoLink::Max`] | one shared |

/// Coupling between the two channels' gain reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StereoLink {
    /// Independent compression per channel.
    Uncoupled,
    /// Both channels driven by the mean reduction.
    #[default]
    Average,
    /// Both channels driven by the larger reduction.
    Max,
}

impl StereoLink {
    /// Select the policy from the raw `stereolink` parameter.
    ///
    /// Zero, negative values and NaN select [`Uncoupled`](Self::Uncoupled).
    ///
    /// # Example
    /// ```rust
    /// use squash_core::StereoLink;
    ///
    /// assert_eq!(StereoLink::from_param(0.0), StereoLink::Uncoupled);
    /// assert_eq!(StereoLink::from_param(0.5), StereoLink::Average);
    /// assert_eq!(StereoLink::from_param(1.0), StereoLink::Average);
    /// assert_eq!(StereoLink::from_param(1.5), StereoLink::Max);
    /// ```
    pub fn from_param(value: f32) -> Self {
        if value > 1.0 {
            Self::Max
        } else if value > 0.0 {
            Self::Average
        } else {
            Self::Uncoupled
        }
    }

    /// Canonical parameter value for this policy.
    pub fn as_param(self) -> f32 {
        match self {
            Self::Uncoupled => 0.0,
            Self::Average => 1.0,
            Self::Max => 2.0,
        }
    }

    /// Returns `true` when both channels share one detector.
    #[inline]
    pub fn is_linked(self) -> bool {
        !matches!(self, Self::Uncoupled)
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Uncoupled => "off",
            Self::Average => "average",
            Self::Max => "max",
        }
    }

    /// Combine per-channel reductions `(left, right)` in dB.
    ///
    /// Linked policies return the same value for both channels.
    #[inline]
    pub fn combine(self, left_db: f32, right_db: f32) -> (f32, f32) {
        match self {
            Self::Uncoupled => (left_db, right_db),
            Self::Average => {
                let mean = (left_db + right_db) / 2.0;
                (mean, mean)
            }
            Self::Max => {
                let peak = left_db.max(right_db);
                (peak, peak)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_param_boundaries() {
        assert_eq!(StereoLink::from_param(0.0), StereoLink::Uncoupled);
        assert_eq!(StereoLink::from_param(-1.0), StereoLink::Uncoupled);
        assert_eq!(StereoLink::from_param(f32::NAN), StereoLink::Uncoupled);
        assert_eq!(StereoLink::from_param(1e-6), StereoLink::Average);
        assert_eq!(StereoLink::from_param(1.0), StereoLink::Average);
        assert_eq!(StereoLink::from_param(1.0001), StereoLink::Max);
        assert_eq!(StereoLink::from_param(2.0), StereoLink::Max);
    }

    #[test]
    fn test_param_roundtrip() {
        for link in [StereoLink::Uncoupled, StereoLink::Average, StereoLink::Max] {
            assert_eq!(StereoLink::from_param(link.as_param()), link);
        }
    }

    #[test]
    fn test_combine_modes() {
        assert_eq!(StereoLink::Uncoupled.combine(2.0, 6.0), (2.0, 6.0));
        assert_eq!(StereoLink::Average.combine(2.0, 6.0), (4.0, 4.0));
        assert_eq!(StereoLink::Max.combine(2.0, 6.0), (6.0, 6.0));
        assert_eq!(StereoLink::Max.combine(6.0, 2.0), (6.0, 6.0));
    }

    #[test]
    fn test_linked() {
        assert!(!StereoLink::Uncoupled.is_linked());
        assert!(StereoLink::Average.is_linked());
        assert!(StereoLink::Max.is_linked());
    }
}
