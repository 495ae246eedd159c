//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32; 32 is written as float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Two channels of samples, stored planar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create new stereo samples from left and right channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "Channels must have same length");
        Self { left, right }
    }

    /// Get the number of samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Check if the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Create from interleaved format (L, R, L, R, ...).
    ///
    /// A trailing odd sample is dropped.
    pub fn from_interleaved(interleaved: &[f32]) -> Self {
        let (left, right) = interleaved
            .chunks_exact(2)
            .map(|frame| (frame[0], frame[1]))
            .unzip();
        Self { left, right }
    }
}

/// Decoded audio in the channel layout the compressor engines accept.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioData {
    /// One channel.
    Mono(Vec<f32>),
    /// Two channels.
    Stereo(StereoSamples),
}

impl AudioData {
    /// Channel count.
    pub fn channels(&self) -> u16 {
        match self {
            AudioData::Mono(_) => 1,
            AudioData::Stereo(_) => 2,
        }
    }

    /// Number of sample frames.
    pub fn frames(&self) -> usize {
        match self {
            AudioData::Mono(samples) => samples.len(),
            AudioData::Stereo(samples) => samples.len(),
        }
    }

    /// Returns `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }
}

fn read_interleaved(reader: WavReader<std::io::BufReader<std::fs::File>>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a mono or stereo WAV file in its own channel layout.
///
/// Integer samples are scaled to `[-1, 1)`. Files with more than two
/// channels are rejected with [`Error::UnsupportedChannels`].
///
/// # Example
/// ```ignore
/// let (data, spec) = read_audio("input.wav")?;
/// println!("{} frames at {} Hz", data.frames(), spec.sample_rate);
/// ```
pub fn read_audio<P: AsRef<Path>>(path: P) -> Result<(AudioData, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let data = match spec.channels {
        1 => AudioData::Mono(read_interleaved(reader)?),
        2 => AudioData::Stereo(StereoSamples::from_interleaved(&read_interleaved(reader)?)),
        n => return Err(Error::UnsupportedChannels(n)),
    };

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = data.frames(),
        "loaded wav"
    );
    Ok((data, spec))
}

/// Write audio in its own channel layout.
///
/// The channel count of `spec` is taken from `data`. A bit depth of 32 is
/// written as float, anything else as clamped integer PCM.
pub fn write_audio<P: AsRef<Path>>(path: P, data: &AudioData, spec: WavSpec) -> Result<()> {
    let spec = WavSpec {
        channels: data.channels(),
        ..spec
    };
    match data {
        AudioData::Mono(samples) => write_frames(path, spec, samples.iter().copied()),
        AudioData::Stereo(samples) => write_frames(
            path,
            spec,
            samples
                .left
                .iter()
                .zip(samples.right.iter())
                .flat_map(|(l, r)| [*l, *r]),
        ),
    }
}

fn write_frames<P, I>(path: P, spec: WavSpec, samples: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = f32>,
{
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
