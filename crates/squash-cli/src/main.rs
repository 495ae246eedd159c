//! Squash CLI - command-line front end for the squash compressor.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "squash")]
#[command(author, version, about = "Squash feed-forward compressor CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a mono or stereo WAV file
    Process(commands::process::ProcessArgs),

    /// Print the static transfer curve of a preset
    Curve(commands::curve::CurveArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),

    /// Show WAV file details or the engine parameters
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
