//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use squash_config::Preset;

/// Preset selection and `key=value` overrides shared by `process` and `curve`.
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// Factory preset name or path to a preset file (TOML)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Parameter override, repeatable (e.g. "threshold=-18dB", "attack=0.02s", "ratio=4:1")
    #[arg(long = "param", value_parser = parse_key_val, num_args = 1)]
    pub params: Vec<String>,
}

impl ParamArgs {
    /// Resolve the preset, apply overrides in order and warn about values
    /// the engine will clamp.
    pub fn resolve(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => Preset::resolve(name).with_context(|| {
                format!("Preset '{name}' not found. Use 'squash presets list' to see available presets.")
            })?,
            None => Preset::default(),
        };

        preset
            .apply_overrides(self.params.iter().map(String::as_str))
            .context("invalid --param override")?;

        if let Err(e) = preset.validate() {
            for err in e.into_errors() {
                tracing::warn!(preset = %preset.name, "{err}; value will be clamped");
            }
        }

        Ok(preset)
    }
}

/// Check a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<String, String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
            Ok(s.to_string())
        }
        _ => Err(format!(
            "Invalid parameter format: '{s}' (expected key=value)"
        )),
    }
}
