//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use squash_core::descriptor::{self, ParamDescriptor};
use squash_core::{CompressorParams, StereoLink, StereoParams};
use std::path::Path;

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::validation::{self, ValidationError, ValidationResult, find_param};

/// Compressor settings stored in a preset.
///
/// Values are plain units (ms, dB, ratio). A missing key takes its
/// descriptor default; `stereo_link` is only written when set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// Attack time in milliseconds.
    pub attack: f32,
    /// Release time in milliseconds.
    pub release: f32,
    /// Knee in dB.
    pub knee: f32,
    /// Compression ratio.
    pub ratio: f32,
    /// Threshold in dB.
    pub threshold: f32,
    /// Makeup gain in dB.
    pub makeup: f32,
    /// Stereo-link selector (stereo engine only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stereo_link: Option<f32>,
}

impl Default for PresetParams {
    fn default() -> Self {
        Self::from_compressor(&CompressorParams::default())
    }
}

impl PresetParams {
    /// Build from engine parameters, leaving the stereo link unset.
    pub fn from_compressor(params: &CompressorParams) -> Self {
        Self {
            attack: params.attack_ms,
            release: params.release_ms,
            knee: params.knee_db,
            ratio: params.ratio,
            threshold: params.threshold_db,
            makeup: params.makeup_db,
            stereo_link: None,
        }
    }

    /// Get a value by parameter name (string id, name or short name).
    pub fn get(&self, name: &str) -> Option<f32> {
        let desc = find_param(name)?;
        self.entries()
            .find(|(d, _)| d.string_id == desc.string_id)
            .map(|(_, value)| value)
    }

    /// Set a value by parameter name (string id, name or short name).
    pub fn set(&mut self, name: &str, value: f32) -> Result<(), ConfigError> {
        let desc =
            find_param(name).ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))?;
        match desc.string_id {
            "attack" => self.attack = value,
            "release" => self.release = value,
            "knee" => self.knee = value,
            "ratio" => self.ratio = value,
            "threshold" => self.threshold = value,
            "makeup" => self.makeup = value,
            "stereo_link" => self.stereo_link = Some(value),
            other => return Err(ConfigError::UnknownParameter(other.to_string())),
        }
        Ok(())
    }

    /// Set values with their descriptors, in engine order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static ParamDescriptor, f32)> {
        let shared = [
            (&descriptor::ATTACK, self.attack),
            (&descriptor::RELEASE, self.release),
            (&descriptor::KNEE, self.knee),
            (&descriptor::RATIO, self.ratio),
            (&descriptor::THRESHOLD, self.threshold),
            (&descriptor::MAKEUP, self.makeup),
        ];
        let link = self.stereo_link.map(|v| (&descriptor::STEREO_LINK, v));
        shared.into_iter().chain(link)
    }

    /// Engine parameters, clamped into the documented ranges.
    pub fn to_compressor(&self) -> CompressorParams {
        CompressorParams {
            attack_ms: self.attack,
            release_ms: self.release,
            knee_db: self.knee,
            ratio: self.ratio,
            threshold_db: self.threshold,
            makeup_db: self.makeup,
        }
        .clamped()
    }

    /// Stereo engine parameters, clamped. An unset link takes its default.
    pub fn to_stereo(&self) -> StereoParams {
        StereoParams {
            compressor: self.to_compressor(),
            stereo_link: self
                .stereo_link
                .unwrap_or(descriptor::STEREO_LINK.default),
        }
        .clamped()
    }
}

/// Compressor preset.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal Leveler"
/// description = "Gentle soft-knee levelling"
/// sample_rate = 48000
///
/// [params]
/// attack = 10.0
/// release = 80.0
/// knee = 3.0
/// ratio = 3.0
/// threshold = -18.0
/// makeup = 4.0
/// stereo_link = 1.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Compressor settings.
    #[serde(default)]
    pub params: PresetParams,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Preset {
    /// Create a preset with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            params: PresetParams::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Replace the compressor settings.
    pub fn with_params(mut self, params: &CompressorParams) -> Self {
        let stereo_link = self.params.stereo_link;
        self.params = PresetParams {
            stereo_link,
            ..PresetParams::from_compressor(params)
        };
        self
    }

    /// Set the stereo link.
    pub fn with_stereo_link(mut self, link: StereoLink) -> Self {
        self.params.stereo_link = Some(link.as_param());
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Find a factory preset by name, or load a preset file.
    pub fn resolve(name_or_path: &str) -> Result<Self, ConfigError> {
        if let Some(preset) = get_factory_preset(name_or_path) {
            return Ok(preset);
        }
        let path = Path::new(name_or_path);
        if path.is_file() {
            return Self::load(path);
        }
        Err(ConfigError::PresetNotFound(name_or_path.to_string()))
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its documented range.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_preset(self)
    }

    /// Apply a `key=value` override, e.g. `threshold=-18dB`.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid_parameter(assignment, "expected key=value"))?;
        let value = validation::parse_param_value(key, value).map_err(|e| match e {
            ValidationError::UnknownParameter(name) => ConfigError::UnknownParameter(name),
            other => ConfigError::Validation(other),
        })?;
        self.params.set(key, value)
    }

    /// Apply several `key=value` overrides in order.
    pub fn apply_overrides<'a>(
        &mut self,
        assignments: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigError> {
        for assignment in assignments {
            self.apply_override(assignment)?;
        }
        Ok(())
    }

    /// Mono engine parameters, clamped.
    pub fn to_params(&self) -> CompressorParams {
        self.params.to_compressor()
    }

    /// Stereo engine parameters, clamped.
    pub fn to_stereo_params(&self) -> StereoParams {
        self.params.to_stereo()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
