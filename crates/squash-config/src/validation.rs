//! Parameter and preset validation.
//!
//! Every check is made against the immutable descriptors of `squash-core`,
//! so the documented ranges live in exactly one place.
//!
//! # Example
//!
//! ```rust
//! use squash_config::{parse_param_value, validate_param_value};
//!
//! assert_eq!(parse_param_value("threshold", "-18dB").unwrap(), -18.0);
//! assert!(validate_param_value("ratio", 4.0).is_ok());
//! assert!(validate_param_value("ratio", 0.5).is_err());
//! ```

use squash_core::descriptor::{self, ParamDescriptor};
use thiserror::Error;

use crate::preset::{Preset, PresetParams};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Parameter value is NaN or infinite.
    #[error("parameter '{param}' is not a finite number")]
    NonFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Sample rate hint of zero.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Flatten into a list of single errors.
    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            ValidationError::Multiple(errors) => errors,
            other => vec![other],
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Normalize a parameter name for consistent lookup.
///
/// Lowercases and maps spaces and hyphens to underscores.
fn normalize_param_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Find the descriptor for a parameter by string id, name or short name.
pub fn find_param(name: &str) -> Option<&'static ParamDescriptor> {
    let normalized = normalize_param_name(name);
    descriptor::STEREO
        .param(&normalized)
        .or_else(|| descriptor::STEREO.param(name.trim()))
}

fn parse_number(param_name: &str, s: &str) -> ValidationResult<f32> {
    s.trim()
        .parse::<f32>()
        .map_err(|_| ValidationError::InvalidFormat {
            param: param_name.to_string(),
            reason: format!("cannot parse '{}' as number", s.trim()),
        })
}

/// Parse a parameter value from a string.
///
/// Supports plain numbers and the unit of each parameter:
/// - Decibels: "-18dB", "4db"
/// - Milliseconds: "10ms"; seconds "0.2s" are converted to milliseconds
/// - Ratios: "4:1"
///
/// A unit that does not match the parameter is rejected.
pub fn parse_param_value(param_name: &str, value_str: &str) -> ValidationResult<f32> {
    let desc = find_param(param_name)
        .ok_or_else(|| ValidationError::UnknownParameter(param_name.to_string()))?;
    let s = value_str.trim();
    let param = desc.string_id;

    let wrong_unit = |unit: &str| ValidationError::InvalidFormat {
        param: param.to_string(),
        reason: format!("unit '{unit}' does not apply"),
    };

    if let Some(v) = s.strip_suffix("dB").or_else(|| s.strip_suffix("db")) {
        if desc.unit != descriptor::ParamUnit::Decibels {
            return Err(wrong_unit("dB"));
        }
        parse_number(param, v)
    } else if let Some(v) = s.strip_suffix("ms") {
        if desc.unit != descriptor::ParamUnit::Milliseconds {
            return Err(wrong_unit("ms"));
        }
        parse_number(param, v)
    } else if let Some(v) = s.strip_suffix('s') {
        if desc.unit != descriptor::ParamUnit::Milliseconds {
            return Err(wrong_unit("s"));
        }
        parse_number(param, v).map(|secs| secs * 1000.0)
    } else if let Some(v) = s.strip_suffix(":1") {
        if desc.unit != descriptor::ParamUnit::Ratio {
            return Err(wrong_unit(":1"));
        }
        parse_number(param, v)
    } else {
        parse_number(param, s)
    }
}

/// Check one value against its parameter's documented range.
pub fn validate_param_value(param_name: &str, value: f32) -> ValidationResult<()> {
    let desc = find_param(param_name)
        .ok_or_else(|| ValidationError::UnknownParameter(param_name.to_string()))?;
    check(desc, value)
}

fn check(desc: &ParamDescriptor, value: f32) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: desc.string_id.to_string(),
        });
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validate every parameter of a preset's `[params]` table.
///
/// Reports all violations, not just the first.
pub fn validate_params(params: &PresetParams) -> ValidationResult<()> {
    let errors = params
        .entries()
        .filter_map(|(desc, value)| check(desc, value).err())
        .collect();
    collect(errors)
}

/// Validate a whole preset.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();
    if preset.sample_rate == 0 {
        errors.push(ValidationError::InvalidSampleRate(preset.sample_rate));
    }
    if let Err(e) = validate_params(&preset.params) {
        errors.extend(e.into_errors());
    }
    collect(errors)
}
