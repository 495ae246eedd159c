//! Factory presets bundled with the squash library.
//!
//! Built-in presets are always available without external files and serve
//! as starting points for common compression jobs.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "vocal_leveler",
    "drum_bus",
    "mix_glue",
    "bass_tamer",
    "brickwall",
    "stereo_master",
];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("vocal_leveler", VOCAL_LEVELER_PRESET),
    ("drum_bus", DRUM_BUS_PRESET),
    ("mix_glue", MIX_GLUE_PRESET),
    ("bass_tamer", BASS_TAMER_PRESET),
    ("brickwall", BRICKWALL_PRESET),
    ("stereo_master", STEREO_MASTER_PRESET),
];

/// Initialization preset - engine defaults.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Engine defaults - no compression below 0 dBFS"
sample_rate = 48000

[params]
attack = 10.0
release = 80.0
knee = 0.0
ratio = 4.0
threshold = 0.0
makeup = 0.0
"#;

/// Soft-knee levelling for spoken and sung vocals.
const VOCAL_LEVELER_PRESET: &str = r#"
name = "Vocal Leveler"
description = "Gentle soft-knee levelling for vocals"
sample_rate = 48000

[params]
attack = 10.0
release = 80.0
knee = 3.0
ratio = 3.0
threshold = -18.0
makeup = 4.0
"#;

/// Fast attack for punchy drums.
const DRUM_BUS_PRESET: &str = r#"
name = "Drum Bus"
description = "Fast attack, short release, firm ratio"
sample_rate = 48000

[params]
attack = 2.0
release = 40.0
knee = 1.5
ratio = 6.0
threshold = -20.0
makeup = 5.0
stereo_link = 2.0
"#;

/// Low ratio, slow release for bus glue.
const MIX_GLUE_PRESET: &str = r#"
name = "Mix Glue"
description = "Low ratio bus compression with a wide knee"
sample_rate = 48000

[params]
attack = 30.0
release = 300.0
knee = 6.0
ratio = 2.0
threshold = -12.0
makeup = 2.0
stereo_link = 1.0
"#;

/// Even out a bass line.
const BASS_TAMER_PRESET: &str = r#"
name = "Bass Tamer"
description = "Steady low end with a medium knee"
sample_rate = 48000

[params]
attack = 15.0
release = 150.0
knee = 3.0
ratio = 4.0
threshold = -24.0
makeup = 6.0
"#;

/// Near-limiting peak control.
const BRICKWALL_PRESET: &str = r#"
name = "Brickwall"
description = "Hard knee, maximum ratio, fastest attack"
sample_rate = 48000

[params]
attack = 1.0
release = 50.0
knee = 0.0
ratio = 20.0
threshold = -6.0
makeup = 0.0
stereo_link = 2.0
"#;

/// Linked mastering compression.
const STEREO_MASTER_PRESET: &str = r#"
name = "Stereo Master"
description = "Transparent linked compression for full mixes"
sample_rate = 48000

[params]
attack = 20.0
release = 200.0
knee = 4.0
ratio = 1.5
threshold = -10.0
makeup = 1.0
stereo_link = 1.0
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use squash_config::factory_presets;
///
/// for preset in &factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches the internal identifier or the display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use squash_config::get_factory_preset;
///
/// let preset = get_factory_preset("vocal_leveler").unwrap();
/// assert_eq!(preset.name, "Vocal Leveler");
/// assert!(get_factory_preset("Vocal Leveler").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if *preset_name == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    // Also try matching against the preset's actual name field
    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset.
///
/// # Example
///
/// ```rust
/// use squash_config::is_factory_preset;
///
/// assert!(is_factory_preset("brickwall"));
/// assert!(is_factory_preset("Drum Bus"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use squash_core::StereoLink;

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());

        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Init"));
        assert!(names.contains(&"Vocal Leveler"));
        assert!(names.contains(&"Brickwall"));
    }

    #[test]
    fn test_factory_presets_validate() {
        for preset in factory_presets() {
            assert!(
                preset.validate().is_ok(),
                "factory preset '{}' failed validation: {:?}",
                preset.name,
                preset.validate()
            );
            assert!(preset.description.is_some(), "{} lacks a description", preset.name);
        }
    }

    #[test]
    fn test_names_match_table() {
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert!(get_factory_preset("INIT").is_some());
        assert!(get_factory_preset("mix glue").is_some());
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_init_is_engine_default() {
        let init = get_factory_preset("init").unwrap();
        assert_eq!(init.to_params(), squash_core::CompressorParams::default());
    }

    #[test]
    fn test_stereo_links() {
        let brickwall = get_factory_preset("brickwall").unwrap();
        assert_eq!(brickwall.to_stereo_params().link(), StereoLink::Max);
        let glue = get_factory_preset("mix_glue").unwrap();
        assert_eq!(glue.to_stereo_params().link(), StereoLink::Average);
    }
}
