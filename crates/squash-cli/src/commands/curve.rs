//! Print the static transfer curve of a preset.

use super::common::ParamArgs;
use clap::Args;
use squash_core::{CURVE_MAX_DB, CURVE_MIN_DB, CURVE_POINTS, transfer_curve};

#[derive(Args)]
pub struct CurveArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Number of points to print
    #[arg(short = 'n', long, default_value_t = 18, value_parser = clap::value_parser!(u16).range(1..=CURVE_POINTS as i64))]
    points: u16,

    /// Lowest input level (dB)
    #[arg(long, default_value_t = CURVE_MIN_DB, allow_negative_numbers = true)]
    min_db: f32,

    /// Highest input level (dB)
    #[arg(long, default_value_t = CURVE_MAX_DB, allow_negative_numbers = true)]
    max_db: f32,
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    if !(args.min_db.is_finite() && args.max_db.is_finite()) || args.min_db >= args.max_db {
        anyhow::bail!(
            "invalid range {} .. {} dB (min must be below max)",
            args.min_db,
            args.max_db
        );
    }

    let preset = args.params.resolve()?;
    let params = preset.to_params();

    let n = usize::from(args.points);
    let mut xs = vec![0.0f32; n];
    let mut ys = vec![0.0f32; n];
    let written = transfer_curve(&params, args.min_db, args.max_db, &mut xs, &mut ys);

    println!(
        "Transfer curve: {} (threshold {} dB, ratio {}:1, knee {} dB)",
        preset.name, params.threshold_db, params.ratio, params.knee_db
    );
    println!();
    println!("  {:>9}  {:>9}  {:>9}", "in (dB)", "out (dB)", "GR (dB)");
    println!("  {:->9}  {:->9}  {:->9}", "", "", "");
    for (x, y) in xs.iter().zip(&ys).take(written) {
        println!("  {x:>9.2}  {y:>9.2}  {:>9.2}", x - y);
    }

    Ok(())
}
