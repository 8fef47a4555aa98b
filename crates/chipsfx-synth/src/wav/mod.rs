//! Byte-exact RIFF/WAVE muxer and data-URI rendering.
//!
//! This module writes canonical 44-byte-header mono PCM WAV files with no
//! timestamps or variable metadata, so equal PCM always yields equal
//! bytes. The BLAKE3 hash of the PCM payload is exposed for determinism
//! validation, and the finished container can be rendered as a
//! `data:audio/wav;base64,` URI for playback collaborators.

mod format;
mod result;
mod writer;


// Re-export public API
pub use format::WavFormat;
pub use result::WavResult;
pub use writer::{write_wav, write_wav_to_vec};
