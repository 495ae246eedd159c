//! Offline processing host.
//!
//! Runs a compressor over whole buffers in fixed-size blocks, the way a
//! plugin host would call it, and collects metering along the way.

use squash_core::{MonoCompressor, StereoCompressor, StereoParams, linear_to_db};

use crate::wav::{AudioData, StereoSamples};
use crate::{Error, Result};

/// Default processing block size in frames.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Level and gain-reduction statistics for one processed buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metering {
    /// Number of channels processed.
    pub channels: u16,
    /// Number of frames processed.
    pub frames: usize,
    /// Peak absolute input level in dBFS.
    pub input_peak_db: f32,
    /// Peak absolute output level in dBFS.
    pub output_peak_db: f32,
    /// Gain reduction reported after every block, in dB. For stereo input
    /// the larger of the two channels.
    pub block_gain_reduction_db: Vec<f32>,
}

impl Metering {
    fn new(channels: u16, frames: usize, blocks: usize) -> Self {
        Self {
            channels,
            frames,
            input_peak_db: linear_to_db(0.0),
            output_peak_db: linear_to_db(0.0),
            block_gain_reduction_db: Vec::with_capacity(blocks),
        }
    }

    /// Largest gain reduction reported by any block.
    pub fn max_gain_reduction_db(&self) -> f32 {
        self.block_gain_reduction_db
            .iter()
            .copied()
            .fold(0.0, f32::max)
    }

    /// Mean of the per-block gain reduction.
    pub fn mean_gain_reduction_db(&self) -> f32 {
        if self.block_gain_reduction_db.is_empty() {
            return 0.0;
        }
        self.block_gain_reduction_db.iter().sum::<f32>()
            / self.block_gain_reduction_db.len() as f32
    }

    /// Gain reduction after the last block.
    pub fn final_gain_reduction_db(&self) -> f32 {
        self.block_gain_reduction_db.last().copied().unwrap_or(0.0)
    }

    fn record_peaks(&mut self, input: &[f32], output: &[f32]) {
        let peak = |buf: &[f32]| buf.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        self.input_peak_db = self.input_peak_db.max(linear_to_db(peak(input)));
        self.output_peak_db = self.output_peak_db.max(linear_to_db(peak(output)));
    }
}

/// Processing engine that runs the compressor over whole buffers.
///
/// Owns one mono and one stereo engine; the input's channel layout picks
/// which one runs. State carries across calls until [`reset`](Self::reset).
///
/// # Example
///
/// ```rust
/// use squash_core::StereoParams;
/// use squash_io::{AudioData, ProcessingEngine};
///
/// let mut engine = ProcessingEngine::new(48000.0, StereoParams::default());
/// let input = AudioData::Mono(vec![0.5; 4096]);
/// let (output, metering) = engine.process(&input).unwrap();
/// assert_eq!(output.frames(), 4096);
/// assert_eq!(metering.block_gain_reduction_db.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ProcessingEngine {
    mono: MonoCompressor,
    stereo: StereoCompressor,
    params: StereoParams,
    sample_rate: f32,
    block_size: usize,
}

impl ProcessingEngine {
    /// Create a new processing engine.
    pub fn new(sample_rate: f32, params: StereoParams) -> Self {
        Self {
            mono: MonoCompressor::new(sample_rate),
            stereo: StereoCompressor::new(sample_rate),
            params,
            sample_rate,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Set the block size in frames (at least 1).
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Get the sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Get the block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Current parameters.
    pub fn params(&self) -> &StereoParams {
        &self.params
    }

    /// Replace the parameters; they take effect at the next block.
    pub fn set_params(&mut self, params: StereoParams) {
        self.params = params;
    }

    /// Zero both engines' detector state.
    pub fn reset(&mut self) {
        self.mono.reset();
        self.stereo.reset();
    }

    /// Process a buffer in its own channel layout.
    pub fn process(&mut self, input: &AudioData) -> Result<(AudioData, Metering)> {
        self.process_with_progress(input, |_, _| {})
    }

    /// Process a buffer, calling `progress(done, total)` in frames after
    /// every block.
    pub fn process_with_progress(
        &mut self,
        input: &AudioData,
        progress: impl FnMut(usize, usize),
    ) -> Result<(AudioData, Metering)> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        tracing::info!(
            channels = input.channels(),
            frames = input.frames(),
            block_size = self.block_size,
            link = self.params.link().name(),
            "processing"
        );

        let (output, metering) = match input {
            AudioData::Mono(samples) => {
                let (out, metering) = self.process_mono(samples, progress);
                (AudioData::Mono(out), metering)
            }
            AudioData::Stereo(samples) => {
                let (out, metering) = self.process_stereo(samples, progress);
                (AudioData::Stereo(out), metering)
            }
        };

        tracing::debug!(
            blocks = metering.block_gain_reduction_db.len(),
            max_gr_db = metering.max_gain_reduction_db(),
            input_peak_db = metering.input_peak_db,
            output_peak_db = metering.output_peak_db,
            "processing finished"
        );
        Ok((output, metering))
    }

    /// Process mono samples block by block.
    pub fn process_mono(
        &mut self,
        input: &[f32],
        mut progress: impl FnMut(usize, usize),
    ) -> (Vec<f32>, Metering) {
        let total = input.len();
        let mut output = vec![0.0; total];
        let mut metering = Metering::new(1, total, total.div_ceil(self.block_size));
        let params = self.params.compressor;

        let mut done = 0;
        for (in_chunk, out_chunk) in input
            .chunks(self.block_size)
            .zip(output.chunks_mut(self.block_size))
        {
            let gr = self.mono.process(in_chunk, out_chunk, &params);
            metering.block_gain_reduction_db.push(gr);
            metering.record_peaks(in_chunk, out_chunk);
            done += in_chunk.len();
            progress(done, total);
        }

        (output, metering)
    }

    /// Process stereo samples block by block.
    pub fn process_stereo(
        &mut self,
        input: &StereoSamples,
        mut progress: impl FnMut(usize, usize),
    ) -> (StereoSamples, Metering) {
        let total = input.len().min(input.right.len());
        let mut left_out = vec![0.0; total];
        let mut right_out = vec![0.0; total];
        let mut metering = Metering::new(2, total, total.div_ceil(self.block_size));

        for start in (0..total).step_by(self.block_size) {
            let end = (start + self.block_size).min(total);
            let [gr_l, gr_r] = self.stereo.process(
                [&input.left[start..end], &input.right[start..end]],
                [&mut left_out[start..end], &mut right_out[start..end]],
                &self.params,
            );
            metering.block_gain_reduction_db.push(gr_l.max(gr_r));
            metering.record_peaks(&input.left[start..end], &left_out[start..end]);
            metering.record_peaks(&input.right[start..end], &right_out[start..end]);
            progress(end, total);
        }

        (StereoSamples::new(left_out, right_out), metering)
    }
}

impl Default for ProcessingEngine {
    fn default() -> Self {
        Self::new(48000.0, StereoParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squash_core::{CompressorParams, StereoLink, db_to_linear};

    fn params(link: StereoLink) -> StereoParams {
        StereoParams::new(
            CompressorParams {
                attack_ms: 1.0,
                release_ms: 50.0,
                knee_db: 0.0,
                ratio: 4.0,
                threshold_db: -20.0,
                makeup_db: 0.0,
            },
            link,
        )
    }

    #[test]
    fn test_block_count_and_lengths() {
        let mut engine = ProcessingEngine::new(48000.0, params(StereoLink::Average))
            .with_block_size(100);
        let (out, metering) = engine.process_mono(&vec![0.5; 1050], |_, _| {});
        assert_eq!(out.len(), 1050);
        assert_eq!(metering.block_gain_reduction_db.len(), 11);
        assert_eq!(metering.frames, 1050);
        assert_eq!(metering.channels, 1);
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let input: Vec<f32> = (0..3000).map(|i| (i as f32 * 0.01).sin() * 0.8).collect();

        let mut a = ProcessingEngine::new(48000.0, params(StereoLink::Max)).with_block_size(64);
        let mut b = ProcessingEngine::new(48000.0, params(StereoLink::Max)).with_block_size(1000);
        let (out_a, _) = a.process_mono(&input, |_, _| {});
        let (out_b, _) = b.process_mono(&input, |_, _| {});
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_metering() {
        let mut engine = ProcessingEngine::new(48000.0, params(StereoLink::Average));
        let (_, metering) = engine.process_mono(&vec![0.5; 9600], |_, _| {});

        assert!((metering.input_peak_db - (-6.0206)).abs() < 1e-3);
        assert!(metering.output_peak_db < metering.input_peak_db);
        // -6 dB into -20 dB at 4:1: 10.5 dB of reduction once settled
        assert!((metering.final_gain_reduction_db() - 10.5).abs() < 0.05);
        assert!(metering.max_gain_reduction_db() >= metering.mean_gain_reduction_db());
    }

    #[test]
    fn test_stereo_progress_reaches_total() {
        let mut engine =
            ProcessingEngine::new(44100.0, params(StereoLink::Uncoupled)).with_block_size(256);
        let input = StereoSamples::new(vec![0.9; 1000], vec![0.01; 1000]);
        let mut last = (0, 0);
        let (out, metering) = engine.process_stereo(&input, |done, total| last = (done, total));

        assert_eq!(last, (1000, 1000));
        assert_eq!(out.len(), 1000);
        assert_eq!(metering.channels, 2);
        // Quiet right channel is untouched when uncoupled
        assert!(out.right.iter().all(|&s| s == 0.01));
        assert!(out.left[999] < 0.9);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let mut engine = ProcessingEngine::default();
        assert!(matches!(
            engine.process(&AudioData::Mono(Vec::new())),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_state_carries_until_reset() {
        let mut engine = ProcessingEngine::new(48000.0, params(StereoLink::Average));
        let loud = AudioData::Mono(vec![0.9; 4800]);
        engine.process(&loud).unwrap();

        let quiet = AudioData::Mono(vec![0.01; 1]);
        let (carried, _) = engine.process(&quiet).unwrap();
        engine.reset();
        let (fresh, _) = engine.process(&quiet).unwrap();

        let AudioData::Mono(carried) = carried else {
            panic!("mono in, mono out")
        };
        let AudioData::Mono(fresh) = fresh else {
            panic!("mono in, mono out")
        };
        assert!(carried[0] < fresh[0]);
        assert_eq!(fresh[0], 0.01 * db_to_linear(0.0));
    }
}
