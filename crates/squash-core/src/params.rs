//! Control values read once per processing block.
//!
//! The core does not validate these. Hosts clamp to the ranges in
//! [`descriptor`](crate::descriptor) before calling `process`; a ratio below
//! 1 or a non-positive attack/release time produces meaningless output.

use crate::descriptor;
use crate::math::linear_to_db;
use crate::stereo_link::StereoLink;

/// Parameters shared by the mono and stereo engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorParams {
    /// Attack time in milliseconds.
    pub attack_ms: f32,
    /// Release time in milliseconds.
    pub release_ms: f32,
    /// Knee control in dB (knee width is `(knee - 0.99) · 6`).
    pub knee_db: f32,
    /// Compression ratio (`n:1`).
    pub ratio: f32,
    /// Threshold in dB.
    pub threshold_db: f32,
    /// Makeup gain in dB.
    pub makeup_db: f32,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self {
            attack_ms: descriptor::ATTACK.default,
            release_ms: descriptor::RELEASE.default,
            knee_db: descriptor::KNEE.default,
            ratio: descriptor::RATIO.default,
            threshold_db: descriptor::THRESHOLD.default,
            makeup_db: descriptor::MAKEUP.default,
        }
    }
}

impl CompressorParams {
    /// Set the threshold from a linear amplitude.
    pub fn with_threshold_linear(mut self, threshold: f32) -> Self {
        self.threshold_db = linear_to_db(threshold);
        self
    }

    /// Set the makeup gain from a linear gain.
    pub fn with_makeup_linear(mut self, makeup: f32) -> Self {
        self.makeup_db = linear_to_db(makeup);
        self
    }

    /// Clamp every value into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            attack_ms: descriptor::ATTACK.clamp(self.attack_ms),
            release_ms: descriptor::RELEASE.clamp(self.release_ms),
            knee_db: descriptor::KNEE.clamp(self.knee_db),
            ratio: descriptor::RATIO.clamp(self.ratio),
            threshold_db: descriptor::THRESHOLD.clamp(self.threshold_db),
            makeup_db: descriptor::MAKEUP.clamp(self.makeup_db),
        }
    }

    /// Values in [`descriptor::COMPRESSOR_PARAMS`] order.
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.attack_ms,
            self.release_ms,
            self.knee_db,
            self.ratio,
            self.threshold_db,
            self.makeup_db,
        ]
    }

    /// Build from values in [`descriptor::COMPRESSOR_PARAMS`] order.
    pub fn from_array(values: [f32; 6]) -> Self {
        let [attack_ms, release_ms, knee_db, ratio, threshold_db, makeup_db] = values;
        Self {
            attack_ms,
            release_ms,
            knee_db,
            ratio,
            threshold_db,
            makeup_db,
        }
    }
}

/// Parameters of the stereo engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoParams {
    /// Shared compressor controls.
    pub compressor: CompressorParams,
    /// Raw stereo-link selector (see [`StereoLink::from_param`]).
    pub stereo_link: f32,
}

impl Default for StereoParams {
    fn default() -> Self {
        Self {
            compressor: CompressorParams::default(),
            stereo_link: descriptor::STEREO_LINK.default,
        }
    }
}

impl StereoParams {
    /// Stereo parameters with the given link policy.
    pub fn new(compressor: CompressorParams, link: StereoLink) -> Self {
        Self {
            compressor,
            stereo_link: link.as_param(),
        }
    }

    /// Link policy selected by [`stereo_link`](Self::stereo_link).
    #[inline]
    pub fn link(&self) -> StereoLink {
        StereoLink::from_param(self.stereo_link)
    }

    /// Clamp every value into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            compressor: self.compressor.clamped(),
            stereo_link: descriptor::STEREO_LINK.clamp(self.stereo_link),
        }
    }
}
