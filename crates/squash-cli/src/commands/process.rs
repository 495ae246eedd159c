//! File-based compression command.

use super::common::ParamArgs;
use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use squash_io::{DEFAULT_BLOCK_SIZE, ProcessingEngine, WavSpec, read_audio, write_audio};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Processing block size in frames
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32); defaults to the input's
    #[arg(long, value_parser = parse_bit_depth)]
    bit_depth: Option<u16>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let preset = args.params.resolve()?;
    let params = preset.to_stereo_params();

    println!("Reading {}...", args.input.display());
    let (input, spec) = read_audio(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        input.frames(),
        input.channels(),
        spec.sample_rate,
        input.frames() as f32 / spec.sample_rate as f32
    );

    println!("Preset: {}", preset.name);
    for (desc, value) in preset.params.entries() {
        println!("  {:12} {}{}", desc.name, value, desc.unit.suffix());
    }

    let mut engine =
        ProcessingEngine::new(spec.sample_rate as f32, params).with_block_size(args.block_size);

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(input.frames() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let (output, metering) =
        engine.process_with_progress(&input, |done, _| pb.set_position(done as u64))?;
    pb.finish_and_clear();

    println!("\nStats:");
    println!("  Input peak:      {:.1} dB", metering.input_peak_db);
    println!("  Output peak:     {:.1} dB", metering.output_peak_db);
    println!(
        "  Gain reduction:  max {:.1} dB, mean {:.1} dB, final {:.1} dB",
        metering.max_gain_reduction_db(),
        metering.mean_gain_reduction_db(),
        metering.final_gain_reduction_db()
    );

    let bits_per_sample = args.bit_depth.unwrap_or(spec.bits_per_sample);
    let out_spec = WavSpec {
        channels: output.channels(),
        sample_rate: spec.sample_rate,
        bits_per_sample,
    };

    println!("\nWriting {}...", args.output.display());
    write_audio(&args.output, &output, out_spec)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Done!");

    Ok(())
}
