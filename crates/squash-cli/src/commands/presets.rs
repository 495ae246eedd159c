//! Preset management commands.
//!
//! Lists the factory presets, shows any preset as TOML and writes new
//! preset files built from a base preset plus overrides.

use super::common::ParamArgs;
use anyhow::Context;
use clap::{Args, Subcommand};
use squash_config::{Preset, factory_presets};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,

        /// Print the raw TOML instead of a table
        #[arg(long)]
        toml: bool,
    },

    /// Write a preset file from a base preset and overrides
    Save {
        /// Output file (TOML)
        path: PathBuf,

        /// Display name stored in the file
        #[arg(short, long)]
        name: Option<String>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name, toml } => show_preset(&name, toml),
        PresetsCommand::Save {
            path,
            name,
            description,
            params,
            force,
        } => save_preset(&path, name, description, &params, force),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:20} - {}", preset.name, desc);
    }
    println!();
    println!("  Show one with: squash presets show <name>");
    Ok(())
}

fn show_preset(name: &str, as_toml: bool) -> anyhow::Result<()> {
    let preset = Preset::resolve(name)?;

    if as_toml {
        print!("{}", preset.to_toml()?);
        return Ok(());
    }

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    println!("Sample Rate: {} Hz", preset.sample_rate);
    println!();

    println!("Parameters:");
    for (desc, value) in preset.params.entries() {
        println!(
            "  {:12} {:>8}{:4} [{} .. {}]",
            desc.string_id,
            value,
            desc.unit.suffix(),
            desc.min,
            desc.max
        );
    }
    println!("  {:12} {}", "link mode", preset.to_stereo_params().link().name());

    if let Err(e) = preset.validate() {
        println!();
        println!("Warnings:");
        for err in e.into_errors() {
            println!("  {err}");
        }
    }

    Ok(())
}

fn save_preset(
    path: &Path,
    name: Option<String>,
    description: Option<String>,
    params: &ParamArgs,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let mut preset = params.resolve()?;
    if let Some(name) = name {
        preset.name = name;
    }
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }

    preset
        .save(path)
        .with_context(|| format!("failed to save preset to {}", path.display()))?;

    println!("Saved preset '{}' to {}", preset.name, path.display());
    Ok(())
}
