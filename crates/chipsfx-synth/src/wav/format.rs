//! WAV file format parameters.

use crate::error::{SynthError, SynthResult};

/// WAV format parameters. Channel count is fixed at mono.
#[derive(Debug, Clone, Copy)]
pub struct WavFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (8 or 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Number of channels; always mono.
    pub const CHANNELS: u16 = 1;

    /// Creates a mono WAV format, validating the field values.
    pub fn mono(sample_rate: u32, bits_per_sample: u16) -> SynthResult<Self> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate { rate: sample_rate });
        }
        if bits_per_sample != 8 && bits_per_sample != 16 {
            return Err(SynthError::InvalidBitsPerSample {
                bits: bits_per_sample,
            });
        }
        Ok(Self {
            sample_rate,
            bits_per_sample,
        })
    }

    /// Calculates bytes per sample.
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub(crate) fn block_align(&self) -> u16 {
        Self::CHANNELS * self.bytes_per_sample()
    }

    /// Calculates byte rate (bytes per second).
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}
