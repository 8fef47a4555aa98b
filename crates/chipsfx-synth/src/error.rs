//! Error types for the synthesis backend.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while producing or containerizing audio.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Bits per sample outside the supported {8, 16} set.
    #[error("invalid bits per sample: {bits} (must be 8 or 16)")]
    InvalidBitsPerSample {
        /// The rejected value.
        bits: u16,
    },

    /// Zero or otherwise unusable output sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The rejected rate.
        rate: u32,
    },

    /// I/O error while writing container bytes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_values() {
        let err = SynthError::InvalidBitsPerSample { bits: 24 };
        assert!(err.to_string().contains("24"));

        let err = SynthError::InvalidSampleRate { rate: 0 };
        assert!(err.to_string().contains('0'));
    }
}
