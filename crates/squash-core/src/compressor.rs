//! Single-channel compressor engine.
//!
//! # Signal Flow
//!
//! ```text
//! Input → |x| in dB → Gain Computer → xl = xg - yg → Detector → gain = 10^(-yl/20)
//!   │                                                                 │
//!   └──────────────────────────── × gain × makeup ────────────────────┴→ Output
//! ```
//!
//! Parameters are read once at the start of every block. Coefficients,
//! knee width and makeup gain are derived from them into a [`BlockState`]
//! and held for the rest of the block.

use crate::detector::{Ballistics, Detector};
use crate::gain_computer::GainComputer;
use crate::math::{db_to_linear, linear_to_db, sanitize_denormal};
use crate::params::CompressorParams;

/// Constants derived from the parameters at the start of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockState {
    computer: GainComputer,
    ballistics: Ballistics,
    makeup: f32,
}

impl BlockState {
    /// Derive block constants for `sample_rate`.
    pub fn new(params: &CompressorParams, sample_rate: f32) -> Self {
        Self {
            computer: GainComputer::from_params(params),
            ballistics: Ballistics::new(params.attack_ms, params.release_ms, sample_rate),
            makeup: db_to_linear(params.makeup_db),
        }
    }

    /// Gain computer for this block.
    pub fn computer(&self) -> &GainComputer {
        &self.computer
    }

    /// Attack/release coefficients for this block.
    pub fn ballistics(&self) -> &Ballistics {
        &self.ballistics
    }

    /// Linear makeup gain.
    pub fn makeup(&self) -> f32 {
        self.makeup
    }

    /// Instantaneous gain reduction in dB for one input sample.
    #[inline]
    pub fn reduction_db(&self, sample: f32) -> f32 {
        let xg = sanitize_denormal(linear_to_db(sample));
        let yg = sanitize_denormal(self.computer.output_db(xg));
        xg - yg
    }

    /// Output multiplier (gain × makeup) for a smoothed reduction `yl` in dB.
    #[inline]
    pub fn output_gain(&self, yl: f32) -> f32 {
        db_to_linear(-yl) * self.makeup
    }
}

/// Mono compressor.
///
/// # Example
///
/// ```rust
/// use squash_core::{CompressorParams, MonoCompressor};
///
/// let mut comp = MonoCompressor::new(48000.0);
/// let params = CompressorParams {
///     threshold_db: -20.0,
///     ratio: 4.0,
///     ..CompressorParams::default()
/// };
///
/// let input = [0.5f32; 256];
/// let mut output = [0.0f32; 256];
/// let gain_reduction_db = comp.process(&input, &mut output, &params);
/// assert!(gain_reduction_db > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MonoCompressor {
    detector: Detector,
    sample_rate: f32,
}

impl MonoCompressor {
    /// Create a compressor with zeroed state.
    pub fn new(sample_rate: f32) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "mono compressor created");
        Self {
            detector: Detector::new(),
            sample_rate,
        }
    }

    /// Sample rate fixed at creation.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current smoothed gain reduction in dB.
    pub fn gain_reduction_db(&self) -> f32 {
        self.detector.level()
    }

    /// Detector state.
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Zero the detector state.
    pub fn reset(&mut self) {
        self.detector.reset();
    }

    /// Process one block.
    ///
    /// Writes `input · gain · makeup` to `output` and returns the smoothed
    /// gain reduction in dB after the last sample. An empty block changes
    /// nothing and returns the carried-forward reduction.
    pub fn process(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        params: &CompressorParams,
    ) -> f32 {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );

        let block = BlockState::new(params, self.sample_rate);
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = *inp * self.tick(*inp, &block);
        }
        self.detector.level()
    }

    /// Process one block in place.
    pub fn process_inplace(&mut self, buffer: &mut [f32], params: &CompressorParams) -> f32 {
        let block = BlockState::new(params, self.sample_rate);
        for sample in buffer.iter_mut() {
            *sample *= self.tick(*sample, &block);
        }
        self.detector.level()
    }

    #[inline]
    fn tick(&mut self, sample: f32, block: &BlockState) -> f32 {
        let xl = block.reduction_db(sample);
        let yl = self.detector.process(xl, &block.ballistics);
        block.output_gain(yl)
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::{vec, vec::Vec};

    fn params() -> CompressorParams {
        CompressorParams {
            attack_ms: 5.0,
            release_ms: 50.0,
            knee_db: 3.0,
            ratio: 4.0,
            threshold_db: -20.0,
            makeup_db: 0.0,
        }
    }

    #[test]
    fn test_quiet_signal_passes() {
        let mut comp = MonoCompressor::new(48000.0);
        let input = vec![0.01f32; 1024];
        let mut output = vec![0.0f32; 1024];
        let gr = comp.process(&input, &mut output, &params());
        assert_eq!(gr, 0.0);
        assert_eq!(output, input);
    }

    #[test]
    fn test_loud_signal_is_reduced() {
        let mut comp = MonoCompressor::new(48000.0);
        let input = vec![0.5f32; 9600];
        let mut output = vec![0.0f32; 9600];
        let gr = comp.process(&input, &mut output, &params());

        // -6 dB in, -20 dB threshold, 4:1 → about 10.5 dB of reduction
        assert!((gr - 10.5).abs() < 0.1, "gr = {gr}");
        let last = output[9599];
        assert!(last < 0.5 && last > 0.1, "last = {last}");
    }

    #[test]
    fn test_zero_length_block_is_noop() {
        let mut comp = MonoCompressor::new(48000.0);
        let mut warm = vec![0.0f32; 480];
        let gr = comp.process(&vec![0.8f32; 480], &mut warm, &params());
        let before = *comp.detector();

        let mut empty: [f32; 0] = [];
        assert_eq!(comp.process(&[], &mut empty, &params()), gr);
        assert_eq!(comp.detector(), &before);
    }

    #[test]
    fn test_block_split_matches_single_block() {
        let input: Vec<f32> = (0..2048).map(|i| libm::sinf(i as f32 * 0.01) * 0.9).collect();

        let mut whole = MonoCompressor::new(44100.0);
        let mut out_whole = vec![0.0f32; input.len()];
        whole.process(&input, &mut out_whole, &params());

        let mut split = MonoCompressor::new(44100.0);
        let mut out_split = vec![0.0f32; input.len()];
        for (i, o) in input.chunks(100).zip(out_split.chunks_mut(100)) {
            split.process(i, o, &params());
        }

        for (a, b) in out_whole.iter().zip(out_split.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_inplace_matches_buffered() {
        let input: Vec<f32> = (0..512).map(|i| libm::cosf(i as f32 * 0.03) * 0.7).collect();

        let mut a = MonoCompressor::new(48000.0);
        let mut out = vec![0.0f32; input.len()];
        let gr_a = a.process(&input, &mut out, &params());

        let mut b = MonoCompressor::new(48000.0);
        let mut buf = input.clone();
        let gr_b = b.process_inplace(&mut buf, &params());

        assert_eq!(out, buf);
        assert_eq!(gr_a, gr_b);
    }

    #[test]
    fn test_makeup_applies_after_compression() {
        let mut comp = MonoCompressor::new(48000.0);
        let p = CompressorParams {
            makeup_db: 6.0206,
            ..params()
        };
        let input = vec![0.01f32; 64];
        let mut output = vec![0.0f32; 64];
        comp.process(&input, &mut output, &p);
        assert!((output[63] - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_silence_stays_finite() {
        let mut comp = MonoCompressor::new(48000.0);
        let mut buf = vec![0.0f32; 4096];
        let gr = comp.process_inplace(&mut buf, &params());
        assert_eq!(gr, 0.0);
        assert!(buf.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_reset() {
        let mut comp = MonoCompressor::new(48000.0);
        let mut buf = vec![1.0f32; 1000];
        assert!(comp.process_inplace(&mut buf, &params()) > 0.0);
        comp.reset();
        assert_eq!(comp.gain_reduction_db(), 0.0);
        assert_eq!(comp.sample_rate(), 48000.0);
    }
}
