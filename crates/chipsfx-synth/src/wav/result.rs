//! WAV muxing result type.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::engine::SampleBuffer;
use crate::error::SynthResult;

use super::format::WavFormat;
use super::writer::write_wav_to_vec;

/// Result of muxing a sample buffer into a WAV container.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only (for determinism validation).
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Muxes a finished sample buffer into a WAV container.
    ///
    /// Fails if the buffer's sample rate or size is outside what the
    /// container supports (rate > 0, 8 or 16 bits).
    pub fn from_buffer(buffer: &SampleBuffer) -> SynthResult<Self> {
        Self::from_pcm(&buffer.pcm, buffer.sample_rate, buffer.sample_size)
    }

    /// Muxes raw PCM bytes into a WAV container.
    pub fn from_pcm(pcm: &[u8], sample_rate: u32, bits_per_sample: u16) -> SynthResult<Self> {
        let format = WavFormat::mono(sample_rate, bits_per_sample)?;
        let pcm_hash = blake3::hash(pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&format, pcm);

        Ok(Self {
            wav_data,
            pcm_hash,
            sample_rate,
            bits_per_sample,
            num_samples: pcm.len() / format.bytes_per_sample() as usize,
        })
    }

    /// Renders the container as a `data:audio/wav;base64,` URI.
    pub fn data_uri(&self) -> String {
        let mut uri = String::from("data:audio/wav;base64,");
        uri.push_str(&STANDARD.encode(&self.wav_data));
        uri
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
