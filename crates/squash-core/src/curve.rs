//! Static transfer-curve sampling for editors and reports.
//!
//! Samples the gain computer over a range of input levels without touching
//! any detector state. The caller owns the buffers.

use crate::gain_computer::GainComputer;
use crate::math::sanitize_denormal;
use crate::params::CompressorParams;

/// Lowest input level of the default preview range (dB).
pub const CURVE_MIN_DB: f32 = -60.0;

/// Highest input level of the default preview range (dB).
pub const CURVE_MAX_DB: f32 = 8.0;

/// Point count of the default preview.
pub const CURVE_POINTS: usize = 1500;

/// Fill `xs` with evenly spaced input levels from `min_db` to `max_db`
/// (inclusive) and `ys` with the matching gain-computer output in dB.
///
/// Uses the shorter of the two slices and returns the number of points
/// written. A single point is placed at `min_db`.
///
/// # Example
///
/// ```rust
/// use squash_core::{CompressorParams, transfer_curve};
///
/// let params = CompressorParams { threshold_db: -20.0, ratio: 4.0, ..CompressorParams::default() };
/// let mut xs = [0.0f32; 5];
/// let mut ys = [0.0f32; 5];
/// assert_eq!(transfer_curve(&params, -40.0, 0.0, &mut xs, &mut ys), 5);
/// assert_eq!(xs, [-40.0, -30.0, -20.0, -10.0, 0.0]);
/// assert_eq!(ys[4], -15.0);
/// ```
pub fn transfer_curve(
    params: &CompressorParams,
    min_db: f32,
    max_db: f32,
    xs: &mut [f32],
    ys: &mut [f32],
) -> usize {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return 0;
    }

    let computer = GainComputer::from_params(params);
    let step = if n > 1 {
        (max_db - min_db) / (n - 1) as f32
    } else {
        0.0
    };

    for (i, (x, y)) in xs.iter_mut().zip(ys.iter_mut()).enumerate() {
        let xg = if n > 1 && i + 1 == n {
            max_db
        } else {
            min_db + step * i as f32
        };
        *x = xg;
        *y = sanitize_denormal(computer.output_db(xg));
    }

    n
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::vec;

    fn params() -> CompressorParams {
        CompressorParams {
            knee_db: 3.0,
            ratio: 4.0,
            threshold_db: -20.0,
            ..CompressorParams::default()
        }
    }

    #[test]
    fn test_default_preview_range() {
        let mut xs = vec![0.0f32; CURVE_POINTS];
        let mut ys = vec![0.0f32; CURVE_POINTS];
        let n = transfer_curve(&params(), CURVE_MIN_DB, CURVE_MAX_DB, &mut xs, &mut ys);

        assert_eq!(n, CURVE_POINTS);
        assert_eq!(xs[0], CURVE_MIN_DB);
        assert_eq!(xs[CURVE_POINTS - 1], CURVE_MAX_DB);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert!(ys.windows(2).all(|w| w[1] >= w[0]));
        // Well below the knee the curve is the identity
        assert_eq!(ys[0], xs[0]);
    }

    #[test]
    fn test_shorter_slice_wins() {
        let mut xs = [0.0f32; 10];
        let mut ys = [f32::NAN; 4];
        assert_eq!(transfer_curve(&params(), -60.0, 0.0, &mut xs, &mut ys), 4);
        assert_eq!(xs[3], 0.0);
        assert_eq!(xs[4], 0.0);
        assert!(ys.iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_empty_and_single_point() {
        let mut none: [f32; 0] = [];
        let mut ys = [0.0f32; 3];
        assert_eq!(transfer_curve(&params(), -60.0, 0.0, &mut none, &mut ys), 0);

        let mut x = [0.0f32; 1];
        let mut y = [0.0f32; 1];
        assert_eq!(transfer_curve(&params(), -30.0, 0.0, &mut x, &mut y), 1);
        assert_eq!(x[0], -30.0);
        assert_eq!(y[0], -30.0);
    }

    #[test]
    fn test_curve_matches_gain_computer() {
        let p = params();
        let gc = GainComputer::from_params(&p);
        let mut xs = [0.0f32; 69];
        let mut ys = [0.0f32; 69];
        transfer_curve(&p, -60.0, 8.0, &mut xs, &mut ys);
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(*y, sanitize_denormal(gc.output_db(*x)));
        }
    }
}
