//! chipsfx Synthesis Backend
//!
//! This crate turns a chipsfx parameter set into a finished PCM buffer
//! and a playable WAV container, entirely through numeric synthesis.
//!
//! # Overview
//!
//! The engine computes a complete buffer up front (no streaming): an
//! oscillator (square, sawtooth, sine, or table noise) runs at 8x
//! oversampling through a low-pass/high-pass filter pair and a flanger
//! tap, shaped by a three-stage envelope, then decimates and quantizes to
//! 8- or 16-bit mono PCM. The [`wav`] module wraps the result in a
//! byte-exact RIFF container and renders `data:` URIs.
//!
//! # Determinism
//!
//! All synthesis is deterministic. Given the same parameters and seed,
//! the output is byte-identical across runs. The crate uses PCG32 for all
//! random number generation, with seeds derived via BLAKE3 hashing.
//!
//! # Example
//!
//! ```
//! use chipsfx_spec::RawParameterSet;
//! use chipsfx_synth::{render_raw, SynthConfig};
//!
//! let params = RawParameterSet::default();
//! let buffer = render_raw(&params, SynthConfig::default(), 42);
//! let wav = chipsfx_synth::wav::WavResult::from_buffer(&buffer)?;
//!
//! assert_eq!(&wav.wav_data[0..4], b"RIFF");
//! # Ok::<(), chipsfx_synth::SynthError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`engine`] - the per-sample synthesis engine and its output buffer
//! - [`config`] - explicit engine configuration (master volume, oversampling)
//! - [`rng`] - deterministic RNG with seed derivation
//! - [`wav`] - byte-exact WAV muxer and data-URI rendering
//! - [`error`] - backend error types

pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod wav;

// Re-export main types at crate root
pub use config::SynthConfig;
pub use engine::{SampleBuffer, SynthesisEngine, MAX_TICKS};
pub use error::{SynthError, SynthResult};
pub use wav::{WavFormat, WavResult};

use chipsfx_spec::{HumanParameterSet, RawParameterSet};

/// Renders a raw parameter set to a finished sample buffer.
///
/// Noise draws come from a dedicated RNG stream derived from `seed` with
/// the component key `"noise"`, so callers that also draw presets from
/// the same base seed get independent streams.
pub fn render_raw(params: &RawParameterSet, config: SynthConfig, seed: u32) -> SampleBuffer {
    let mut noise_rng = rng::create_component_rng(seed, "noise");
    SynthesisEngine::from_raw(params, config).generate(&mut noise_rng)
}

/// Renders a human-units parameter set to a finished sample buffer.
///
/// Same seeding scheme as [`render_raw`].
pub fn render_human(knobs: &HumanParameterSet, config: SynthConfig, seed: u32) -> SampleBuffer {
    let mut noise_rng = rng::create_component_rng(seed, "noise");
    SynthesisEngine::from_human(knobs, config).generate(&mut noise_rng)
}
