//! Preset and parameter configuration for the squash compressor.
//!
//! # Features
//!
//! - **Preset System**: Load and save compressor presets as TOML files
//! - **Validation**: Check values against the engine's parameter descriptors
//! - **Overrides**: Apply `key=value` assignments with unit suffixes
//! - **Factory Presets**: Built-in presets for common use cases
//!
//! # Example
//!
//! ```rust,no_run
//! use squash_config::{Preset, get_factory_preset};
//!
//! // Start from a factory preset and tweak it
//! let mut preset = get_factory_preset("vocal_leveler").unwrap();
//! preset.apply_override("threshold=-20dB").unwrap();
//! preset.validate().unwrap();
//!
//! // Save and reload
//! preset.save("presets/my_vocal.toml").unwrap();
//! let reloaded = Preset::load("presets/my_vocal.toml").unwrap();
//! assert_eq!(reloaded.to_params(), preset.to_params());
//! ```

mod error;
mod preset;

/// Parameter and preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::{Preset, PresetParams};
pub use validation::{
    ValidationError, ValidationResult, find_param, parse_param_value, validate_param_value,
    validate_params, validate_preset,
};
