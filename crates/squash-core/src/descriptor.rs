//! Immutable parameter and engine descriptors.
//!
//! Adapters (plugin shims, the offline host, preset validation) read the
//! documented range and default of every control from here. All descriptors
//! are `const` data; nothing in this module is mutable.
//!
//! # Example
//!
//! ```rust
//! use squash_core::descriptor::{STEREO, THRESHOLD};
//!
//! assert_eq!(STEREO.channels, 2);
//! assert_eq!(STEREO.param("threshold"), Some(&THRESHOLD));
//! assert_eq!(THRESHOLD.clamp(-100.0), -80.0);
//! ```

/// Unit of a parameter value, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Milliseconds.
    Milliseconds,
    /// Decibels.
    Decibels,
    /// Ratio (`n:1`).
    Ratio,
    /// Dimensionless selector.
    None,
}

impl ParamUnit {
    /// Suffix appended to formatted values.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Milliseconds => " ms",
            Self::Decibels => " dB",
            Self::Ratio => ":1",
            Self::None => "",
        }
    }
}

/// Describes one control parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Short name for narrow displays (max 8 characters).
    pub short_name: &'static str,
    /// Stable identifier used in preset files and on the command line.
    pub string_id: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Smallest documented value.
    pub min: f32,
    /// Largest documented value.
    pub max: f32,
    /// Value used when none is supplied.
    pub default: f32,
}

impl ParamDescriptor {
    /// Clamp `value` into `[min, max]`.
    ///
    /// NaN has no position in the range and falls back to the default;
    /// infinities clamp to the nearer bound.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Returns `true` if `value` is finite and inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Map a plain value to `[0, 1]` (linear).
    pub fn normalize(&self, value: f32) -> f32 {
        ((self.clamp(value) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Map a normalized value in `[0, 1]` back to the plain range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Returns `true` if `name` matches the string id, name or short name
    /// (ASCII case-insensitive).
    pub fn matches(&self, name: &str) -> bool {
        self.string_id.eq_ignore_ascii_case(name)
            || self.name.eq_ignore_ascii_case(name)
            || self.short_name.eq_ignore_ascii_case(name)
    }
}

/// Attack time.
pub const ATTACK: ParamDescriptor = ParamDescriptor {
    name: "Attack",
    short_name: "Attack",
    string_id: "attack",
    unit: ParamUnit::Milliseconds,
    min: 1.0,
    max: 200.0,
    default: 10.0,
};

/// Release time.
pub const RELEASE: ParamDescriptor = ParamDescriptor {
    name: "Release",
    short_name: "Release",
    string_id: "release",
    unit: ParamUnit::Milliseconds,
    min: 2.0,
    max: 500.0,
    default: 80.0,
};

/// Knee control.
pub const KNEE: ParamDescriptor = ParamDescriptor {
    name: "Knee",
    short_name: "Knee",
    string_id: "knee",
    unit: ParamUnit::Decibels,
    min: 0.0,
    max: 9.0,
    default: 0.0,
};

/// Compression ratio.
pub const RATIO: ParamDescriptor = ParamDescriptor {
    name: "Ratio",
    short_name: "Ratio",
    string_id: "ratio",
    unit: ParamUnit::Ratio,
    min: 1.0,
    max: 20.0,
    default: 4.0,
};

/// Threshold.
pub const THRESHOLD: ParamDescriptor = ParamDescriptor {
    name: "Threshold",
    short_name: "Thresh",
    string_id: "threshold",
    unit: ParamUnit::Decibels,
    min: -80.0,
    max: 0.0,
    default: 0.0,
};

/// Makeup gain.
pub const MAKEUP: ParamDescriptor = ParamDescriptor {
    name: "Makeup Gain",
    short_name: "Makeup",
    string_id: "makeup",
    unit: ParamUnit::Decibels,
    min: 0.0,
    max: 30.0,
    default: 0.0,
};

/// Stereo-link selector (stereo engine only).
pub const STEREO_LINK: ParamDescriptor = ParamDescriptor {
    name: "Stereo Link",
    short_name: "Link",
    string_id: "stereo_link",
    unit: ParamUnit::None,
    min: 0.0,
    max: 2.0,
    default: 1.0,
};

/// Parameters shared by both engines, in processing order.
pub const COMPRESSOR_PARAMS: [ParamDescriptor; 6] =
    [ATTACK, RELEASE, KNEE, RATIO, THRESHOLD, MAKEUP];

/// Stereo engine parameters.
pub const STEREO_PARAMS: [ParamDescriptor; 7] =
    [ATTACK, RELEASE, KNEE, RATIO, THRESHOLD, MAKEUP, STEREO_LINK];

/// Describes one engine variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Stable identifier.
    pub id: &'static str,
    /// Audio channel count.
    pub channels: usize,
    /// Control parameters.
    pub params: &'static [ParamDescriptor],
}

impl EngineDescriptor {
    /// Find a parameter by string id, name or short name.
    pub fn param(&self, name: &str) -> Option<&'static ParamDescriptor> {
        self.params.iter().find(|p| p.matches(name))
    }

    /// Index of a parameter by string id, name or short name.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.matches(name))
    }
}

/// Single-channel engine.
pub const MONO: EngineDescriptor = EngineDescriptor {
    name: "Squash Mono",
    id: "squash_mono",
    channels: 1,
    params: &COMPRESSOR_PARAMS,
};

/// Two-channel engine.
pub const STEREO: EngineDescriptor = EngineDescriptor {
    name: "Squash Stereo",
    id: "squash_stereo",
    channels: 2,
    params: &STEREO_PARAMS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_inside_ranges() {
        for desc in STEREO_PARAMS {
            assert!(desc.contains(desc.default), "{} default out of range", desc.name);
            assert!(desc.min < desc.max);
            assert!(desc.short_name.len() <= 8);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(MONO.param("ratio"), Some(&RATIO));
        assert_eq!(MONO.param("Thresh"), Some(&THRESHOLD));
        assert_eq!(MONO.param("MAKEUP GAIN"), Some(&MAKEUP));
        assert_eq!(MONO.param("stereo_link"), None);
        assert_eq!(STEREO.param_index("stereo_link"), Some(6));
        assert_eq!(MONO.param_index("attack"), Some(0));
    }

    #[test]
    fn test_clamp_and_contains() {
        assert_eq!(ATTACK.clamp(0.0), 1.0);
        assert_eq!(RELEASE.clamp(1000.0), 500.0);
        assert!(!RATIO.contains(0.5));
        assert!(!RATIO.contains(f32::NAN));
        assert!(RATIO.contains(20.0));
    }

    #[test]
    fn test_clamp_non_finite() {
        for desc in STEREO_PARAMS {
            assert_eq!(desc.clamp(f32::NAN), desc.default, "{}", desc.name);
            assert_eq!(desc.clamp(f32::INFINITY), desc.max, "{}", desc.name);
            assert_eq!(desc.clamp(f32::NEG_INFINITY), desc.min, "{}", desc.name);
            assert!(desc.contains(desc.clamp(f32::NAN)));
        }
        assert_eq!(THRESHOLD.normalize(f32::NAN), THRESHOLD.normalize(THRESHOLD.default));
    }

    #[test]
    fn test_normalize_roundtrip() {
        let n = THRESHOLD.normalize(-40.0);
        assert!((n - 0.5).abs() < 1e-6);
        assert!((THRESHOLD.denormalize(n) - (-40.0)).abs() < 1e-4);
        assert_eq!(KNEE.normalize(100.0), 1.0);
    }

    #[test]
    fn test_engine_shapes() {
        assert_eq!(MONO.channels, 1);
        assert_eq!(MONO.params.len(), 6);
        assert_eq!(STEREO.params.len(), 7);
        assert_eq!(&STEREO.params[..6], MONO.params);
    }
}
