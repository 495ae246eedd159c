//! Two-channel compressor engine with stereo link.
//!
//! Each channel runs its own gain computer. The link policy then decides
//! which detector state is driven:
//!
//! - [`StereoLink::Uncoupled`]: the left and right detectors, independently.
//! - [`StereoLink::Average`] / [`StereoLink::Max`]: one shared detector whose
//!   gain is applied to both channels, keeping the stereo image in place.
//!
//! The per-channel pair and the shared detector are separate state. Changing
//! the link between blocks continues from the state the new policy owns.

use crate::compressor::BlockState;
use crate::detector::Detector;
use crate::params::StereoParams;
use crate::stereo_link::StereoLink;

/// Stereo compressor.
///
/// # Example
///
/// ```rust
/// use squash_core::{CompressorParams, StereoCompressor, StereoLink, StereoParams};
///
/// let mut comp = StereoCompressor::new(48000.0);
/// let params = StereoParams::new(
///     CompressorParams { threshold_db: -20.0, ..CompressorParams::default() },
///     StereoLink::Max,
/// );
///
/// let left = [0.5f32; 128];
/// let right = [0.05f32; 128];
/// let mut out_l = [0.0f32; 128];
/// let mut out_r = [0.0f32; 128];
/// let [gr_l, gr_r] = comp.process([&left, &right], [&mut out_l, &mut out_r], &params);
/// assert_eq!(gr_l, gr_r);
/// ```
#[derive(Debug, Clone)]
pub struct StereoCompressor {
    channels: [Detector; 2],
    linked: Detector,
    link: StereoLink,
    sample_rate: f32,
}

impl StereoCompressor {
    /// Create a compressor with zeroed state.
    pub fn new(sample_rate: f32) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "stereo compressor created");
        Self {
            channels: [Detector::new(); 2],
            linked: Detector::new(),
            link: StereoLink::default(),
            sample_rate,
        }
    }

    /// Sample rate fixed at creation.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Link policy used by the most recent block.
    pub fn link(&self) -> StereoLink {
        self.link
    }

    /// Current smoothed gain reduction `[left, right]` in dB.
    pub fn gain_reduction_db(&self) -> [f32; 2] {
        if self.link.is_linked() {
            let level = self.linked.level();
            [level, level]
        } else {
            [self.channels[0].level(), self.channels[1].level()]
        }
    }

    /// Per-channel detectors used when uncoupled.
    pub fn channel_detectors(&self) -> &[Detector; 2] {
        &self.channels
    }

    /// Shared detector used by the linked policies.
    pub fn linked_detector(&self) -> &Detector {
        &self.linked
    }

    /// Zero all detector state.
    pub fn reset(&mut self) {
        self.channels = [Detector::new(); 2];
        self.linked.reset();
    }

    /// Process one stereo block.
    ///
    /// Returns the smoothed gain reduction `[left, right]` in dB after the
    /// last sample; linked policies report the same value twice.
    pub fn process(
        &mut self,
        input: [&[f32]; 2],
        output: [&mut [f32]; 2],
        params: &StereoParams,
    ) -> [f32; 2] {
        let [in_l, in_r] = input;
        let [out_l, out_r] = output;
        debug_assert_eq!(in_l.len(), in_r.len());
        debug_assert_eq!(in_l.len(), out_l.len());
        debug_assert_eq!(out_l.len(), out_r.len());

        let n = in_l.len().min(in_r.len()).min(out_l.len()).min(out_r.len());
        let block = BlockState::new(&params.compressor, self.sample_rate);
        self.link = params.link();

        for i in 0..n {
            let left = in_l[i];
            let right = in_r[i];
            let (gain_l, gain_r) = self.tick(left, right, &block);
            out_l[i] = left * gain_l;
            out_r[i] = right * gain_r;
        }

        self.gain_reduction_db()
    }

    /// Process one stereo block in place.
    pub fn process_inplace(&mut self, buffer: [&mut [f32]; 2], params: &StereoParams) -> [f32; 2] {
        let [left, right] = buffer;
        debug_assert_eq!(left.len(), right.len());

        let block = BlockState::new(&params.compressor, self.sample_rate);
        self.link = params.link();

        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (gain_l, gain_r) = self.tick(*l, *r, &block);
            *l *= gain_l;
            *r *= gain_r;
        }

        self.gain_reduction_db()
    }

    #[inline]
    fn tick(&mut self, left: f32, right: f32, block: &BlockState) -> (f32, f32) {
        let (xl_l, xl_r) = self
            .link
            .combine(block.reduction_db(left), block.reduction_db(right));
        let ballistics = block.ballistics();

        if self.link.is_linked() {
            let gain = block.output_gain(self.linked.process(xl_l, ballistics));
            (gain, gain)
        } else {
            let [det_l, det_r] = &mut self.channels;
            (
                block.output_gain(det_l.process(xl_l, ballistics)),
                block.output_gain(det_r.process(xl_r, ballistics)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::compressor::MonoCompressor;
    use crate::params::CompressorParams;
    use alloc::{vec, vec::Vec};

    fn base() -> CompressorParams {
        CompressorParams {
            attack_ms: 2.0,
            release_ms: 40.0,
            knee_db: 2.0,
            ratio: 6.0,
            threshold_db: -24.0,
            makeup_db: 3.0,
        }
    }

    fn signal(n: usize, freq: f32, amp: f32) -> Vec<f32> {
        (0..n).map(|i| libm::sinf(i as f32 * freq) * amp).collect()
    }

    #[test]
    fn test_uncoupled_matches_two_mono_engines() {
        let left = signal(1024, 0.02, 0.9);
        let right = signal(1024, 0.05, 0.2);
        let params = StereoParams::new(base(), StereoLink::Uncoupled);

        let mut stereo = StereoCompressor::new(48000.0);
        let mut out_l = vec![0.0; 1024];
        let mut out_r = vec![0.0; 1024];
        let gr = stereo.process([&left, &right], [&mut out_l, &mut out_r], &params);

        let mut mono_l = MonoCompressor::new(48000.0);
        let mut mono_r = MonoCompressor::new(48000.0);
        let mut ref_l = vec![0.0; 1024];
        let mut ref_r = vec![0.0; 1024];
        let gr_l = mono_l.process(&left, &mut ref_l, &base());
        let gr_r = mono_r.process(&right, &mut ref_r, &base());

        assert_eq!(gr, [gr_l, gr_r]);
        for i in 0..1024 {
            assert_eq!(out_l[i].to_bits(), ref_l[i].to_bits(), "left {i}");
            assert_eq!(out_r[i].to_bits(), ref_r[i].to_bits(), "right {i}");
        }
    }

    #[test]
    fn test_linked_modes_apply_equal_gain() {
        let left = signal(2048, 0.03, 0.9);
        let right = signal(2048, 0.011, 0.3);

        for link in [StereoLink::Average, StereoLink::Max] {
            let mut comp = StereoCompressor::new(48000.0);
            let mut out_l = vec![0.0; 2048];
            let mut out_r = vec![0.0; 2048];
            let [gr_l, gr_r] = comp.process(
                [&left, &right],
                [&mut out_l, &mut out_r],
                &StereoParams::new(base(), link),
            );
            assert_eq!(gr_l, gr_r);
            assert!(gr_l > 0.0);

            for i in 0..2048 {
                if left[i] != 0.0 && right[i] != 0.0 {
                    let gl = out_l[i] / left[i];
                    let gr = out_r[i] / right[i];
                    assert!((gl - gr).abs() <= gl.abs() * 1e-5, "{link:?} sample {i}");
                }
            }
        }
    }

    #[test]
    fn test_max_reduces_more_than_average() {
        let left = vec![0.9f32; 4800];
        let right = vec![0.01f32; 4800];

        let run = |link| {
            let mut comp = StereoCompressor::new(48000.0);
            let mut out_l = vec![0.0; 4800];
            let mut out_r = vec![0.0; 4800];
            comp.process(
                [&left, &right],
                [&mut out_l, &mut out_r],
                &StereoParams::new(base(), link),
            )[0]
        };

        let avg = run(StereoLink::Average);
        let max = run(StereoLink::Max);
        assert!(max > avg, "max {max} avg {avg}");
        // Right channel is far below threshold: average is half of max
        assert!((avg - max / 2.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_length_block() {
        let params = StereoParams {
            compressor: base(),
            ..StereoParams::default()
        };
        let mut comp = StereoCompressor::new(48000.0);
        let mut l = vec![0.8f32; 256];
        let mut r = vec![0.8f32; 256];
        let gr = comp.process_inplace([&mut l, &mut r], &params);
        assert!(gr[0] > 0.0);

        let mut el: [f32; 0] = [];
        let mut er: [f32; 0] = [];
        let again = comp.process([&[], &[]], [&mut el, &mut er], &params);
        assert_eq!(gr, again);
    }

    #[test]
    fn test_inplace_matches_buffered() {
        let left = signal(700, 0.07, 0.8);
        let right = signal(700, 0.02, 0.6);
        let params = StereoParams::new(base(), StereoLink::Average);

        let mut a = StereoCompressor::new(44100.0);
        let mut out_l = vec![0.0; 700];
        let mut out_r = vec![0.0; 700];
        a.process([&left, &right], [&mut out_l, &mut out_r], &params);

        let mut b = StereoCompressor::new(44100.0);
        let mut buf_l = left.clone();
        let mut buf_r = right.clone();
        b.process_inplace([&mut buf_l, &mut buf_r], &params);

        assert_eq!(out_l, buf_l);
        assert_eq!(out_r, buf_r);
    }

    #[test]
    fn test_link_switch_uses_separate_state() {
        let mut comp = StereoCompressor::new(48000.0);
        let mut l = vec![0.9f32; 2000];
        let mut r = vec![0.9f32; 2000];
        comp.process_inplace([&mut l, &mut r], &StereoParams::new(base(), StereoLink::Max));
        assert!(comp.linked_detector().level() > 0.0);
        assert_eq!(comp.channel_detectors()[0].level(), 0.0);

        comp.reset();
        assert_eq!(comp.linked_detector().level(), 0.0);
        assert_eq!(comp.gain_reduction_db(), [0.0, 0.0]);
    }
}
