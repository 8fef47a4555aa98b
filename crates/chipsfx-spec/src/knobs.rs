//! Human-units parameter set and the raw-to-physical translation table.
//!
//! `HumanParameterSet` expresses the same sound in Hz, seconds, percent,
//! and dB. Every field is produced from the raw set by one fixed formula;
//! the table in [`HumanParameterSet::from_raw`] is the definition of what
//! each raw knob means physically. The synthesis backend has its own
//! raw-to-engine-state formulas that intentionally do not share code with
//! this table: the two paths use subtly different constants, and merging
//! them would silently change one side's documented numbers.

use serde::{Deserialize, Serialize};

use crate::params::{RawParameterSet, WaveShape};

/// Internal synthesis tick rate in Hz.
const TICK_RATE: f64 = 44100.0;

/// Sub-samples generated per internal tick.
const OVERSAMPLING: f64 = 8.0;

/// Sub-sample rate: the rate filter coefficients and flanger taps run at.
const SUPER_RATE: f64 = TICK_RATE * OVERSAMPLING;

/// Low-pass cutoff reported when the filter knob is fully open
/// (raw `p_lpf_freq` = 1, coefficient at its 0.1 ceiling).
pub const LOW_PASS_OPEN_HZ: f64 =
    SUPER_RATE * (0.1 / 0.9) / (2.0 * std::f64::consts::PI);

/// A parameter set in physical units.
///
/// Produced by [`HumanParameterSet::from_raw`] or by the human preset
/// family; consumed by the synthesis engine's human construction path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanParameterSet {
    /// Base oscillator waveform.
    pub wave_type: WaveShape,
    /// Attack stage length in seconds.
    pub attack: f64,
    /// Sustain stage length in seconds.
    pub sustain: f64,
    /// Sustain punch boost in percent.
    pub punch: f64,
    /// Decay stage length in seconds.
    pub decay: f64,
    /// Oscillator frequency in Hz.
    pub frequency: f64,
    /// Minimum-frequency cutoff in Hz; 0 disables it.
    pub frequency_min: f64,
    /// Frequency slide in octaves per second (negative slides down).
    pub frequency_slide: f64,
    /// Slide of the frequency slide in octaves per second squared.
    pub frequency_delta_slide: f64,
    /// Vibrato depth in percent of the base period.
    pub vibrato_depth: f64,
    /// Vibrato rate in Hz.
    pub vibrato_rate: f64,
    /// One-shot arpeggio frequency ratio.
    pub arpeggio_multiplier: f64,
    /// Arpeggio onset rate in Hz; 0 means the pitch change never fires.
    pub arpeggio_rate: f64,
    /// Square/sawtooth duty cycle in percent.
    pub duty_cycle: f64,
    /// Duty cycle sweep in percent per second.
    pub duty_cycle_sweep: f64,
    /// Retrigger rate in Hz; 0 disables repeats.
    pub retrigger_rate: f64,
    /// Flanger offset in milliseconds (signed).
    pub flanger_offset: f64,
    /// Flanger offset sweep in milliseconds per second (signed).
    pub flanger_sweep: f64,
    /// Low-pass cutoff in Hz; [`LOW_PASS_OPEN_HZ`] leaves the filter open.
    pub low_pass_frequency: f64,
    /// Low-pass cutoff sweep as a factor per second.
    pub low_pass_sweep: f64,
    /// Low-pass damping in percent; 100 means no resonance.
    pub low_pass_resonance: f64,
    /// High-pass cutoff in Hz.
    pub high_pass_frequency: f64,
    /// High-pass cutoff sweep as a factor per second.
    pub high_pass_sweep: f64,
    /// Output gain in dB.
    pub gain: f64,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output sample size in bits.
    pub sample_size: u16,
}

impl Default for HumanParameterSet {
    fn default() -> Self {
        Self::from_raw(&RawParameterSet::default())
    }
}

impl HumanParameterSet {
    /// Translates a raw parameter set into physical units.
    ///
    /// One formula per field, writing `x` for the raw field value:
    ///
    /// | field | formula | unit |
    /// |---|---|---|
    /// | `attack` | x^2 * 100000 / 44100 | s |
    /// | `sustain` | x^2 * 100000 / 44100 | s |
    /// | `punch` | x * 100 | % |
    /// | `decay` | x^2 * 100000 / 44100 | s |
    /// | `frequency` | 8 * 441 * (x^2 + 0.001) | Hz |
    /// | `frequency_min` | 8 * 441 * (x^2 + 0.001), 0 when x = 0 | Hz |
    /// | `frequency_slide` | 44100 * log0.5(1 - x^3 / 100) | oct/s |
    /// | `frequency_delta_slide` | x^3 * 1e-6 * 44100^2 / ln 2 | oct/s^2 |
    /// | `vibrato_depth` | x * 50 | % |
    /// | `vibrato_rate` | 44100 * x^2 * 0.01 / (2 pi) | Hz |
    /// | `arpeggio_multiplier` | 1 / (1 - 0.9 x^2), or 1 / (1 + 10 x^2) for x < 0 | ratio |
    /// | `arpeggio_rate` | 44100 / floor((1-x)^2 * 20000 + 32) | Hz |
    /// | `duty_cycle` | 100 * (0.5 - 0.5 x) | % |
    /// | `duty_cycle_sweep` | -x * 5e-5 * 44100 * 100 | %/s |
    /// | `retrigger_rate` | 44100 / floor((1-x)^2 * 20000 + 32), 0 when x = 0 | Hz |
    /// | `flanger_offset` | sign(x) * x^2 * 1020 / (8 * 44.1) | ms |
    /// | `flanger_sweep` | sign(x) * x^2 * 44100 / (8 * 44.1) | ms/s |
    /// | `low_pass_frequency` | 8 * 44100 * w / (1 - w) / (2 pi), w = 0.1 x^3 | Hz |
    /// | `low_pass_sweep` | (1 + x * 1e-4) ^ 44100 | factor/s |
    /// | `low_pass_resonance` | 100 / (1 + 20 x^2) | % |
    /// | `high_pass_frequency` | 8 * 44100 * w / (1 - w) / (2 pi), w = 0.1 x^2 | Hz |
    /// | `high_pass_sweep` | (1 + x * 3e-4) ^ 44100 | factor/s |
    /// | `gain` | 10 * log10((e^x - 1)^2), x = sound_vol | dB |
    pub fn from_raw(raw: &RawParameterSet) -> Self {
        let lpf_w = 0.1 * raw.p_lpf_freq.powi(3);
        let hpf_w = 0.1 * raw.p_hpf_freq.powi(2);
        Self {
            wave_type: raw.wave_type,
            attack: raw.p_env_attack.powi(2) * 100_000.0 / TICK_RATE,
            sustain: raw.p_env_sustain.powi(2) * 100_000.0 / TICK_RATE,
            punch: raw.p_env_punch * 100.0,
            decay: raw.p_env_decay.powi(2) * 100_000.0 / TICK_RATE,
            frequency: OVERSAMPLING * 441.0 * (raw.p_base_freq.powi(2) + 0.001),
            frequency_min: if raw.p_freq_limit > 0.0 {
                OVERSAMPLING * 441.0 * (raw.p_freq_limit.powi(2) + 0.001)
            } else {
                0.0
            },
            frequency_slide: TICK_RATE
                * (1.0 - raw.p_freq_ramp.powi(3) / 100.0).log(0.5),
            frequency_delta_slide: raw.p_freq_dramp.powi(3) * 1e-6 * TICK_RATE * TICK_RATE
                / std::f64::consts::LN_2,
            vibrato_depth: raw.p_vib_strength * 50.0,
            vibrato_rate: TICK_RATE * raw.p_vib_speed.powi(2) * 0.01
                / (2.0 * std::f64::consts::PI),
            arpeggio_multiplier: if raw.p_arp_mod >= 0.0 {
                1.0 / (1.0 - 0.9 * raw.p_arp_mod.powi(2))
            } else {
                1.0 / (1.0 + 10.0 * raw.p_arp_mod.powi(2))
            },
            arpeggio_rate: TICK_RATE
                / ((1.0 - raw.p_arp_speed).powi(2) * 20_000.0 + 32.0).floor(),
            duty_cycle: 100.0 * (0.5 - 0.5 * raw.p_duty),
            duty_cycle_sweep: -raw.p_duty_ramp * 5e-5 * TICK_RATE * 100.0,
            retrigger_rate: if raw.p_repeat_speed > 0.0 {
                TICK_RATE / ((1.0 - raw.p_repeat_speed).powi(2) * 20_000.0 + 32.0).floor()
            } else {
                0.0
            },
            flanger_offset: raw.p_pha_offset.signum() * raw.p_pha_offset.powi(2) * 1020.0
                / (SUPER_RATE / 1000.0),
            flanger_sweep: raw.p_pha_ramp.signum() * raw.p_pha_ramp.powi(2) * TICK_RATE
                / (SUPER_RATE / 1000.0),
            low_pass_frequency: SUPER_RATE * lpf_w / (1.0 - lpf_w)
                / (2.0 * std::f64::consts::PI),
            low_pass_sweep: (1.0 + raw.p_lpf_ramp * 1e-4).powf(TICK_RATE),
            low_pass_resonance: 100.0 / (1.0 + 20.0 * raw.p_lpf_resonance.powi(2)),
            high_pass_frequency: SUPER_RATE * hpf_w / (1.0 - hpf_w)
                / (2.0 * std::f64::consts::PI),
            high_pass_sweep: (1.0 + raw.p_hpf_ramp * 3e-4).powf(TICK_RATE),
            gain: 10.0 * ((raw.sound_vol.exp() - 1.0).powi(2)).log10(),
            sample_rate: raw.sample_rate,
            sample_size: raw.sample_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_default_translation_values() {
        let k = HumanParameterSet::default();
        assert_eq!(k.attack, 0.0);
        // 0.3^2 * 100000 / 44100
        assert!(close(k.sustain, 0.2041, 1e-3), "{}", k.sustain);
        assert!(close(k.decay, 0.3628, 1e-3), "{}", k.decay);
        // 8 * 441 * (0.09 + 0.001)
        assert!(close(k.frequency, 321.05, 0.01), "{}", k.frequency);
        assert_eq!(k.frequency_min, 0.0);
        assert_eq!(k.frequency_slide, 0.0);
        assert_eq!(k.duty_cycle, 50.0);
        assert_eq!(k.retrigger_rate, 0.0);
        assert_eq!(k.arpeggio_multiplier, 1.0);
        assert_eq!(k.low_pass_sweep, 1.0);
        assert_eq!(k.low_pass_resonance, 100.0);
        assert_eq!(k.high_pass_frequency, 0.0);
        // 20 * log10(e^0.5 - 1)
        assert!(close(k.gain, -3.7595, 1e-3), "{}", k.gain);
        assert_eq!(k.sample_rate, 44100);
        assert_eq!(k.sample_size, 8);
    }

    #[test]
    fn test_tone_parameters_translate_to_440_hz() {
        let mut raw = RawParameterSet::default();
        raw.wave_type = WaveShape::Sine;
        raw.p_base_freq = 0.35173364;
        raw.p_env_attack = 0.0;
        raw.p_env_sustain = 0.6641;
        raw.p_env_decay = 0.0;

        let k = HumanParameterSet::from_raw(&raw);
        assert!(close(k.frequency, 440.0, 0.01), "{}", k.frequency);
        assert!(close(k.sustain, 1.0, 0.001), "{}", k.sustain);
        assert_eq!(k.attack, 0.0);
        assert_eq!(k.decay, 0.0);
        assert_eq!(k.punch, 0.0);
    }

    #[test]
    fn test_frequency_slide_sign_follows_ramp() {
        let mut raw = RawParameterSet::default();
        raw.p_freq_ramp = 0.3;
        let up = HumanParameterSet::from_raw(&raw).frequency_slide;
        raw.p_freq_ramp = -0.3;
        let down = HumanParameterSet::from_raw(&raw).frequency_slide;
        assert!(up > 0.0, "{up}");
        assert!(down < 0.0, "{down}");
        assert!(close(up, -down, 1e-6));
    }

    #[test]
    fn test_arpeggio_multiplier_branches() {
        let mut raw = RawParameterSet::default();
        raw.p_arp_mod = 0.5;
        let up = HumanParameterSet::from_raw(&raw).arpeggio_multiplier;
        assert!(close(up, 1.0 / (1.0 - 0.225), 1e-9), "{up}");

        raw.p_arp_mod = -0.5;
        let down = HumanParameterSet::from_raw(&raw).arpeggio_multiplier;
        assert!(close(down, 1.0 / 3.5, 1e-9), "{down}");
    }

    #[test]
    fn test_open_low_pass_reports_open_cutoff() {
        let raw = RawParameterSet::default();
        let k = HumanParameterSet::from_raw(&raw);
        assert!(close(k.low_pass_frequency, LOW_PASS_OPEN_HZ, 1e-6));
    }

    #[test]
    fn test_json_roundtrip() {
        let k = HumanParameterSet::default();
        let json = serde_json::to_string(&k).unwrap();
        let restored: HumanParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, k);
    }
}
