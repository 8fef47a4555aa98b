//! Error types for parameter decoding and preset lookup.

use thiserror::Error;

/// Result type for parameter operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while decoding or validating parameters.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Wave shape code outside the defined 0-3 range.
    #[error("invalid wave shape code: {code}")]
    InvalidWaveShape {
        /// The rejected code.
        code: u8,
    },

    /// Share string contains a character outside the base58 alphabet.
    #[error("invalid base58 character {ch:?} at position {position}")]
    InvalidBase58Char {
        /// The offending character.
        ch: char,
        /// Zero-based position in the input string.
        position: usize,
    },

    /// Share string decoded to the wrong number of bytes.
    #[error("share string decodes to {actual} bytes, expected {expected}")]
    InvalidPayloadLength {
        /// Required payload length.
        expected: usize,
        /// Length actually decoded.
        actual: usize,
    },

    /// Preset name not present in the registry.
    #[error("unknown preset: {name}")]
    UnknownPreset {
        /// The requested name.
        name: String,
    },

    /// Malformed parameter JSON.
    #[error("malformed parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpecError {
    /// Creates an unknown-preset error.
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }
}
