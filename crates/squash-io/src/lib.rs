//! Audio file I/O and offline processing for the squash compressor.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_audio`] and [`write_audio`] keep the file's
//!   mono or stereo layout; other channel counts are rejected
//! - **Offline processing**: [`ProcessingEngine`] runs the mono or stereo
//!   engine over a whole buffer in host-sized blocks and returns [`Metering`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use squash_core::StereoParams;
//! use squash_io::{ProcessingEngine, read_audio, write_audio};
//!
//! let (input, spec) = read_audio("input.wav")?;
//! let mut engine = ProcessingEngine::new(spec.sample_rate as f32, StereoParams::default());
//! let (output, metering) = engine.process(&input)?;
//! println!("max gain reduction: {:.1} dB", metering.max_gain_reduction_db());
//! write_audio("output.wav", &output, spec)?;
//! ```

mod engine;
mod wav;

pub use engine::{DEFAULT_BLOCK_SIZE, Metering, ProcessingEngine};
pub use wav::{
    AudioData, StereoSamples, WavFormat, WavInfo, WavSpec, read_audio, read_wav_info, write_audio,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file has a channel count the engines cannot process.
    #[error("Unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// There is nothing to process.
    #[error("Input contains no samples")]
    EmptyInput,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
