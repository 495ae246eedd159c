//! Squash Core - feed-forward dynamic-range compressor engine
//!
//! This crate holds the sample-accurate gain engine shared by every squash
//! front end. It is real-time safe: nothing in the processing path allocates,
//! locks or performs I/O.
//!
//! # Core Abstractions
//!
//! ## Engines
//!
//! - [`MonoCompressor`] - One channel, one detector
//! - [`StereoCompressor`] - Two channels with a [`StereoLink`] policy
//!
//! ## Building Blocks
//!
//! - [`GainComputer`] - Static soft-knee curve in the dB domain
//! - [`Detector`] - Two-stage attack/release smoother of the gain reduction
//! - [`Ballistics`] - Attack/release coefficients for one block
//! - [`BlockState`] - Everything derived from the parameters at block start
//!
//! ## Parameters and Descriptors
//!
//! - [`CompressorParams`] / [`StereoParams`] - Control values read once per block
//! - [`descriptor`] - Immutable ranges, defaults and engine shapes
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`sanitize_denormal`]
//! - [`transfer_curve`] - Sample the static curve for previews
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! squash-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to log engine construction at debug level.
//!
//! # Example
//!
//! ```rust
//! use squash_core::{CompressorParams, MonoCompressor};
//!
//! let params = CompressorParams {
//!     threshold_db: -18.0,
//!     ratio: 3.0,
//!     knee_db: 3.0,
//!     ..CompressorParams::default()
//! };
//!
//! let mut comp = MonoCompressor::new(44100.0);
//! let mut block = [0.7f32; 64];
//! let gain_reduction_db = comp.process_inplace(&mut block, &params);
//! assert!(gain_reduction_db >= 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod compressor;
pub mod curve;
pub mod descriptor;
pub mod detector;
pub mod gain_computer;
pub mod math;
pub mod params;
pub mod stereo;
pub mod stereo_link;

// Re-export main types at crate root
pub use compressor::{BlockState, MonoCompressor};
pub use curve::{CURVE_MAX_DB, CURVE_MIN_DB, CURVE_POINTS, transfer_curve};
pub use descriptor::{EngineDescriptor, ParamDescriptor, ParamUnit};
pub use detector::{Ballistics, Detector};
pub use gain_computer::{GainComputer, KNEE_EPSILON, knee_width};
pub use math::{
    LEVEL_FLOOR_DB, db_to_linear, linear_to_db, sanitize_denormal, time_constant_coeff,
};
pub use params::{CompressorParams, StereoParams};
pub use stereo::StereoCompressor;
pub use stereo_link::StereoLink;
