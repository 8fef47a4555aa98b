//! Raw parameter set: the normalized knobs a sound is described with.
//!
//! `RawParameterSet` is the UI-facing representation: 23 named fields in a
//! fixed order (a wave shape selector plus 22 floats on [0,1] or [-1,1]),
//! with three output settings carried alongside. The declared field order
//! is the wire order for the share-string codec and must never change.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{SpecError, SpecResult};

/// Number of fields in the wire format: wave shape plus 22 floats.
pub const FIELD_COUNT: usize = 23;

/// Number of float fields carried by the wire format.
pub const FLOAT_FIELD_COUNT: usize = FIELD_COUNT - 1;

/// Base oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum WaveShape {
    /// Duty-cycle-gated square wave.
    #[default]
    Square = 0,
    /// Duty-cycle-gated sawtooth ramp.
    Sawtooth = 1,
    /// Pure sine.
    Sine = 2,
    /// Table-driven white noise, refreshed once per oscillator cycle.
    Noise = 3,
}

impl WaveShape {
    /// Converts a wire code into a wave shape.
    ///
    /// Any code outside 0-3 is rejected here, at the decode boundary, so
    /// the synthesis engine never sees an unrecognized shape.
    pub fn from_code(code: u8) -> SpecResult<Self> {
        match code {
            0 => Ok(WaveShape::Square),
            1 => Ok(WaveShape::Sawtooth),
            2 => Ok(WaveShape::Sine),
            3 => Ok(WaveShape::Noise),
            _ => Err(SpecError::InvalidWaveShape { code }),
        }
    }

    /// Returns the wire code for this shape.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for WaveShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for WaveShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        WaveShape::from_code(code).map_err(de::Error::custom)
    }
}

/// The raw, normalized parameter set.
///
/// Field ranges: unsigned knobs live on [0,1], signed knobs (`*_ramp`,
/// `p_freq_dramp`, `p_arp_mod`, `p_pha_offset`, `p_pha_ramp`) on [-1,1].
/// Values are assumed pre-validated; the synthesis engine does not
/// re-check ranges. JSON import ignores unknown keys and fills missing
/// keys with the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParameterSet {
    /// Base oscillator waveform.
    pub wave_type: WaveShape,
    /// Envelope attack length.
    pub p_env_attack: f64,
    /// Envelope sustain length.
    pub p_env_sustain: f64,
    /// Transient boost applied across the sustain stage.
    pub p_env_punch: f64,
    /// Envelope decay length.
    pub p_env_decay: f64,
    /// Oscillator base frequency.
    pub p_base_freq: f64,
    /// Minimum-frequency cutoff; 0 disables it.
    pub p_freq_limit: f64,
    /// Frequency slide (signed).
    pub p_freq_ramp: f64,
    /// Slide of the frequency slide (signed).
    pub p_freq_dramp: f64,
    /// Vibrato depth.
    pub p_vib_strength: f64,
    /// Vibrato speed.
    pub p_vib_speed: f64,
    /// One-shot arpeggio pitch change (signed).
    pub p_arp_mod: f64,
    /// Delay before the arpeggio pitch change.
    pub p_arp_speed: f64,
    /// Square/sawtooth duty cycle.
    pub p_duty: f64,
    /// Duty cycle sweep (signed).
    pub p_duty_ramp: f64,
    /// Retrigger rate; 0 disables repeats.
    pub p_repeat_speed: f64,
    /// Flanger offset (signed).
    pub p_pha_offset: f64,
    /// Flanger offset sweep (signed).
    pub p_pha_ramp: f64,
    /// Low-pass filter cutoff; 1 leaves the filter open.
    pub p_lpf_freq: f64,
    /// Low-pass cutoff sweep (signed).
    pub p_lpf_ramp: f64,
    /// Low-pass resonance.
    pub p_lpf_resonance: f64,
    /// High-pass filter cutoff.
    pub p_hpf_freq: f64,
    /// High-pass cutoff sweep (signed).
    pub p_hpf_ramp: f64,

    /// Output volume; not part of the share-string payload.
    pub sound_vol: f64,
    /// Output sample rate in Hz; not part of the share-string payload.
    pub sample_rate: u32,
    /// Output sample size in bits (8 or 16); not part of the payload.
    pub sample_size: u16,
}

impl Default for RawParameterSet {
    fn default() -> Self {
        Self {
            wave_type: WaveShape::Square,
            p_env_attack: 0.0,
            p_env_sustain: 0.3,
            p_env_punch: 0.0,
            p_env_decay: 0.4,
            p_base_freq: 0.3,
            p_freq_limit: 0.0,
            p_freq_ramp: 0.0,
            p_freq_dramp: 0.0,
            p_vib_strength: 0.0,
            p_vib_speed: 0.0,
            p_arp_mod: 0.0,
            p_arp_speed: 0.0,
            p_duty: 0.0,
            p_duty_ramp: 0.0,
            p_repeat_speed: 0.0,
            p_pha_offset: 0.0,
            p_pha_ramp: 0.0,
            p_lpf_freq: 1.0,
            p_lpf_ramp: 0.0,
            p_lpf_resonance: 0.0,
            p_hpf_freq: 0.0,
            p_hpf_ramp: 0.0,
            sound_vol: 0.5,
            sample_rate: 44100,
            sample_size: 8,
        }
    }
}

impl RawParameterSet {
    /// Parses a parameter set from JSON.
    ///
    /// Unknown keys are ignored; missing keys keep their defaults.
    /// Malformed JSON surfaces as [`SpecError::Json`].
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the parameter set to compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("parameter serialization cannot fail")
    }

    /// Serializes the parameter set to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).expect("parameter serialization cannot fail")
    }

    /// Returns the 22 float fields in wire order.
    ///
    /// This order, together with the leading wave shape byte, defines the
    /// share-string byte layout.
    pub fn wire_floats(&self) -> [f64; FLOAT_FIELD_COUNT] {
        [
            self.p_env_attack,
            self.p_env_sustain,
            self.p_env_punch,
            self.p_env_decay,
            self.p_base_freq,
            self.p_freq_limit,
            self.p_freq_ramp,
            self.p_freq_dramp,
            self.p_vib_strength,
            self.p_vib_speed,
            self.p_arp_mod,
            self.p_arp_speed,
            self.p_duty,
            self.p_duty_ramp,
            self.p_repeat_speed,
            self.p_pha_offset,
            self.p_pha_ramp,
            self.p_lpf_freq,
            self.p_lpf_ramp,
            self.p_lpf_resonance,
            self.p_hpf_freq,
            self.p_hpf_ramp,
        ]
    }

    /// Overwrites the 22 float fields from wire order.
    pub fn set_wire_floats(&mut self, values: [f64; FLOAT_FIELD_COUNT]) {
        let [attack, sustain, punch, decay, base_freq, freq_limit, freq_ramp, freq_dramp, vib_strength, vib_speed, arp_mod, arp_speed, duty, duty_ramp, repeat_speed, pha_offset, pha_ramp, lpf_freq, lpf_ramp, lpf_resonance, hpf_freq, hpf_ramp] =
            values;
        self.p_env_attack = attack;
        self.p_env_sustain = sustain;
        self.p_env_punch = punch;
        self.p_env_decay = decay;
        self.p_base_freq = base_freq;
        self.p_freq_limit = freq_limit;
        self.p_freq_ramp = freq_ramp;
        self.p_freq_dramp = freq_dramp;
        self.p_vib_strength = vib_strength;
        self.p_vib_speed = vib_speed;
        self.p_arp_mod = arp_mod;
        self.p_arp_speed = arp_speed;
        self.p_duty = duty;
        self.p_duty_ramp = duty_ramp;
        self.p_repeat_speed = repeat_speed;
        self.p_pha_offset = pha_offset;
        self.p_pha_ramp = pha_ramp;
        self.p_lpf_freq = lpf_freq;
        self.p_lpf_ramp = lpf_ramp;
        self.p_lpf_resonance = lpf_resonance;
        self.p_hpf_freq = hpf_freq;
        self.p_hpf_ramp = hpf_ramp;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_wave_shape_codes_roundtrip() {
        for code in 0..4u8 {
            let shape = WaveShape::from_code(code).unwrap();
            assert_eq!(shape.code(), code);
        }
    }

    #[test]
    fn test_wave_shape_rejects_unknown_codes() {
        for code in 4..=u8::MAX {
            assert!(WaveShape::from_code(code).is_err(), "code {code}");
        }
    }

    #[test]
    fn test_defaults() {
        let p = RawParameterSet::default();
        assert_eq!(p.wave_type, WaveShape::Square);
        assert_eq!(p.p_env_sustain, 0.3);
        assert_eq!(p.p_env_decay, 0.4);
        assert_eq!(p.p_base_freq, 0.3);
        assert_eq!(p.p_lpf_freq, 1.0);
        assert_eq!(p.sound_vol, 0.5);
        assert_eq!(p.sample_rate, 44100);
        assert_eq!(p.sample_size, 8);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut p = RawParameterSet::default();
        p.wave_type = WaveShape::Noise;
        p.p_base_freq = 0.77;
        p.p_freq_ramp = -0.25;

        let restored = RawParameterSet::from_json(&p.to_json()).unwrap();
        assert_eq!(restored, p);
    }

    #[test]
    fn test_json_ignores_unknown_keys_and_fills_defaults() {
        let p =
            RawParameterSet::from_json(r#"{"p_base_freq": 0.9, "not_a_knob": true}"#).unwrap();
        assert_eq!(p.p_base_freq, 0.9);
        assert_eq!(p.p_env_decay, 0.4);
        assert_eq!(p.wave_type, WaveShape::Square);
    }

    #[test]
    fn test_json_rejects_malformed_input() {
        assert!(RawParameterSet::from_json("{nope").is_err());
        assert!(RawParameterSet::from_json(r#"{"wave_type": 9}"#).is_err());
    }

    #[test]
    fn test_wire_floats_order_is_stable() {
        let mut p = RawParameterSet::default();
        p.p_env_attack = 0.01;
        p.p_hpf_ramp = 0.22;

        let floats = p.wire_floats();
        assert_eq!(floats.len(), FLOAT_FIELD_COUNT);
        assert_eq!(floats[0], 0.01);
        assert_eq!(floats[21], 0.22);

        let mut q = RawParameterSet::default();
        q.set_wire_floats(floats);
        assert_eq!(q.p_env_attack, 0.01);
        assert_eq!(q.p_hpf_ramp, 0.22);
    }
}
