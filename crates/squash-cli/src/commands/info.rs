//! Display WAV file metadata or the engine descriptors.

use clap::Args;
use squash_core::descriptor::{EngineDescriptor, MONO, STEREO};
use squash_io::{WavFormat, read_wav_info};

/// Display WAV file information, or the engines and their parameters when
/// no file is given.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: Option<std::path::PathBuf>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    match args.file {
        Some(path) => show_file(&path),
        None => {
            show_engine(&MONO);
            println!();
            show_engine(&STEREO);
            Ok(())
        }
    }
}

fn show_file(path: &std::path::Path) -> anyhow::Result<()> {
    let info = read_wav_info(path)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", path.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    let file_size = std::fs::metadata(path)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    if !matches!(info.channels, 1 | 2) {
        println!();
        println!("Note: only mono and stereo files can be processed.");
    }

    Ok(())
}

fn show_engine(engine: &EngineDescriptor) {
    println!("{} ({}, {} channel(s))", engine.name, engine.id, engine.channels);
    println!("  {:12} {:>9} {:>9} {:>9}  unit", "parameter", "min", "max", "default");
    for p in engine.params {
        println!(
            "  {:12} {:>9} {:>9} {:>9}  {}",
            p.string_id,
            p.min,
            p.max,
            p.default,
            p.unit.suffix().trim()
        );
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
