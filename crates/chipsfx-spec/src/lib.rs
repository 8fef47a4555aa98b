//! chipsfx Parameter Library
//!
//! This crate provides the parameter types, preset generators, and codecs
//! for chipsfx sound descriptions. A sound is fully described by a
//! [`RawParameterSet`]: 23 normalized knobs in a fixed order, plus output
//! settings. The set can be hand-edited, produced by a named preset
//! generator, imported from JSON, or reconstructed from a base58 share
//! string.
//!
//! # Representations
//!
//! - [`RawParameterSet`] - the normalized knob values the codecs operate on
//! - [`HumanParameterSet`] - the same sound in Hz, seconds, percent, and
//!   dB, derived by a fixed per-field translation table
//!
//! # Determinism
//!
//! Preset generators take an explicit PCG32; the same seed always yields
//! the same parameter values. Nothing in this crate touches a global RNG.
//!
//! # Example
//!
//! ```
//! use chipsfx_spec::base58;
//! use chipsfx_spec::presets;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(42);
//! let generator = presets::raw_preset("laserShoot")?;
//! let params = generator(&mut rng);
//!
//! // Round-trip through the share string format
//! let share = base58::to_b58(&params);
//! let restored = base58::from_b58(&share)?;
//! assert_eq!(base58::to_b58(&restored), share);
//! # Ok::<(), chipsfx_spec::SpecError>(())
//! ```
//!
//! # Modules
//!
//! - [`params`]: raw parameter set and wave shape types
//! - [`knobs`]: human-units parameter set and the translation table
//! - [`presets`]: randomized preset generator registries
//! - [`float32`]: 32-bit IEEE-754 codec for the wire format
//! - [`base58`]: share-string codec
//! - [`error`]: error types

pub mod base58;
pub mod error;
pub mod float32;
pub mod knobs;
pub mod params;
pub mod presets;

// Re-export commonly used types at the crate root
pub use error::{SpecError, SpecResult};
pub use knobs::HumanParameterSet;
pub use params::{RawParameterSet, WaveShape, FIELD_COUNT, FLOAT_FIELD_COUNT};
