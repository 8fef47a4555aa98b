//! Per-sample synthesis engine.
//!
//! One [`SynthesisEngine`] serves one generation request: it is built from
//! a parameter set, consumed by [`SynthesisEngine::generate`], and
//! discarded. All derived per-run constants are computed once at
//! construction; the generation loop then runs at a fixed 44.1 kHz
//! internal tick rate, producing `oversampling` filtered sub-samples per
//! tick and decimating down to the requested output rate.
//!
//! The engine accepts either parameter representation. The raw and human
//! construction paths use two separately written formula sets on purpose:
//! each path's constants are a documented contract, and folding them into
//! shared helpers would silently change one side.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;

use chipsfx_spec::{HumanParameterSet, RawParameterSet, WaveShape};

use crate::config::SynthConfig;

/// Internal tick rate in Hz; envelope, slides, and sweeps advance at this
/// rate regardless of the output sample rate.
const TICK_RATE: f64 = 44100.0;

/// Flanger ring buffer length in sub-samples. Power of two; tap indexing
/// relies on the mask.
const FLANGER_BUFFER_LEN: usize = 1024;

/// Noise table length; refreshed once per oscillator cycle.
const NOISE_TABLE_LEN: usize = 32;

/// Defensive ceiling on internal ticks (30 s at the internal rate).
///
/// The envelope and frequency-cutoff conditions terminate every in-range
/// parameter set well below this; out-of-range envelope knobs could
/// otherwise spin the loop arbitrarily long, so generation stops here and
/// flags the buffer as truncated instead.
pub const MAX_TICKS: u64 = 30 * 44100;

/// Derived oscillator constants that a retrigger restores.
///
/// A retrigger recomputes these from the stored construction parameters;
/// since they are pure functions of those parameters, restoring the
/// construction-time snapshot is the same computation done once.
#[derive(Debug, Clone, Copy)]
struct OscillatorState {
    period: f64,
    period_max: f64,
    cutoff_enabled: bool,
    period_mult: f64,
    period_mult_slide: f64,
    duty_cycle: f64,
    duty_cycle_slide: f64,
    arpeggio_multiplier: f64,
    arpeggio_time: u64,
}

/// A finished generation result: quantized PCM plus a float mirror.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Quantized PCM bytes: one byte per sample at 8 bits (unsigned,
    /// midpoint 128), two little-endian bytes per sample at 16 bits
    /// (signed).
    pub pcm: Vec<u8>,
    /// The quantized samples mapped back to [-1, 1), one entry per output
    /// sample.
    pub normalized: Vec<f32>,
    /// Number of samples clamped during quantization.
    pub clipped: usize,
    /// Whether generation stopped at [`MAX_TICKS`] instead of a natural
    /// termination condition.
    pub truncated: bool,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output sample size in bits.
    pub sample_size: u16,
}

impl SampleBuffer {
    /// Number of output samples.
    pub fn num_samples(&self) -> usize {
        self.normalized.len()
    }

    /// Buffer duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples() as f64 / self.sample_rate as f64
    }
}

/// Stateful per-request synthesizer.
#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    config: SynthConfig,
    wave_shape: WaveShape,

    /// Construction-time snapshot restored on retrigger.
    start: OscillatorState,
    /// Live oscillator state, mutated every tick.
    state: OscillatorState,
    repeat_time: u64,
    elapsed_since_repeat: u64,

    envelope_length: [u64; 3],
    envelope_punch: f64,

    vibrato_speed: f64,
    vibrato_amplitude: f64,

    low_pass_enabled: bool,
    fltw: f64,
    fltw_d: f64,
    fltdmp: f64,
    flthp: f64,
    flthp_d: f64,

    flanger_offset: f64,
    flanger_offset_slide: f64,

    gain: f64,
    sample_rate: u32,
    sample_size: u16,
}

impl SynthesisEngine {
    /// Builds an engine from a raw parameter set.
    ///
    /// Derived-constant formulas, per internal tick (`x` is the raw field):
    ///
    /// - period `= 100 / (p_base_freq^2 + 0.001)` super-sample units
    /// - period ceiling `= 100 / (p_freq_limit^2 + 0.001)`; cutoff enabled
    ///   iff `p_freq_limit > 0`
    /// - period multiplier `= 1 - p_freq_ramp^3 * 0.01`, its slide
    ///   `= -p_freq_dramp^3 * 1e-6`
    /// - duty `= 0.5 - 0.5 * p_duty`, slide `= -p_duty_ramp * 5e-5`
    /// - arpeggio multiplier `= 1 - 0.9 x^2` (x >= 0) or `1 + 10 x^2`,
    ///   onset `= floor((1-x)^2 * 20000 + 32)` ticks, disabled at x = 1
    /// - envelope stage lengths `= floor(x^2 * 100000)` ticks
    /// - low-pass `w = 0.1 x^3` (open at x = 1), sweep `1 + p_lpf_ramp * 1e-4`,
    ///   damping `= min(0.8, 5 / (1 + 20 r^2) * (0.01 + w))`
    /// - high-pass `w = 0.1 x^2`, sweep `1 + p_hpf_ramp * 3e-4`
    /// - vibrato phase step `= 0.01 x^2` rad, amplitude `= 0.5 * strength`
    /// - flanger offset `= sign(x) * x^2 * 1020` sub-samples, slide
    ///   `= sign(x) * x^2`
    /// - retrigger `= floor((1-x)^2 * 20000 + 32)` ticks, disabled at x = 0
    /// - gain `= e^sound_vol - 1`
    pub fn from_raw(params: &RawParameterSet, config: SynthConfig) -> Self {
        let start = OscillatorState {
            period: 100.0 / (params.p_base_freq * params.p_base_freq + 0.001),
            period_max: 100.0 / (params.p_freq_limit * params.p_freq_limit + 0.001),
            cutoff_enabled: params.p_freq_limit > 0.0,
            period_mult: 1.0 - params.p_freq_ramp.powi(3) * 0.01,
            period_mult_slide: -params.p_freq_dramp.powi(3) * 1e-6,
            duty_cycle: 0.5 - params.p_duty * 0.5,
            duty_cycle_slide: -params.p_duty_ramp * 5e-5,
            arpeggio_multiplier: if params.p_arp_mod >= 0.0 {
                1.0 - params.p_arp_mod.powi(2) * 0.9
            } else {
                1.0 + params.p_arp_mod.powi(2) * 10.0
            },
            arpeggio_time: if params.p_arp_speed == 1.0 {
                0
            } else {
                ((1.0 - params.p_arp_speed).powi(2) * 20_000.0 + 32.0) as u64
            },
        };

        let fltw = params.p_lpf_freq.powi(3) * 0.1;
        Self {
            config,
            wave_shape: params.wave_type,
            start,
            state: start,
            repeat_time: if params.p_repeat_speed == 0.0 {
                0
            } else {
                ((1.0 - params.p_repeat_speed).powi(2) * 20_000.0 + 32.0) as u64
            },
            elapsed_since_repeat: 0,
            envelope_length: [
                (params.p_env_attack.powi(2) * 100_000.0) as u64,
                (params.p_env_sustain.powi(2) * 100_000.0) as u64,
                (params.p_env_decay.powi(2) * 100_000.0) as u64,
            ],
            envelope_punch: params.p_env_punch,
            vibrato_speed: params.p_vib_speed.powi(2) * 0.01,
            vibrato_amplitude: params.p_vib_strength * 0.5,
            low_pass_enabled: params.p_lpf_freq != 1.0,
            fltw,
            fltw_d: 1.0 + params.p_lpf_ramp * 1e-4,
            fltdmp: (5.0 / (1.0 + params.p_lpf_resonance.powi(2) * 20.0) * (0.01 + fltw))
                .min(0.8),
            flthp: params.p_hpf_freq.powi(2) * 0.1,
            flthp_d: 1.0 + params.p_hpf_ramp * 3e-4,
            flanger_offset: params.p_pha_offset.signum()
                * params.p_pha_offset.powi(2)
                * 1020.0,
            flanger_offset_slide: params.p_pha_ramp.signum() * params.p_pha_ramp.powi(2),
            gain: params.sound_vol.exp() - 1.0,
            sample_rate: params.sample_rate,
            sample_size: params.sample_size,
        }
    }

    /// Builds an engine from a human-units parameter set.
    ///
    /// Inverts the physical units directly: periods come from Hz against
    /// the configured sub-sample rate, envelope lengths from seconds, the
    /// period multiplier from octaves per second, filter coefficients from
    /// cutoff Hz via `w = c / (1 + c)` with `c = 2 pi f / super_rate`, and
    /// gain from dB. With `frequency_min` at 0 the cutoff is disabled but
    /// the period still clamps at 100000 super-sample units, mirroring the
    /// raw path's open-limit ceiling.
    pub fn from_human(knobs: &HumanParameterSet, config: SynthConfig) -> Self {
        let super_rate = TICK_RATE * config.oversampling as f64;
        let (cutoff_enabled, period_max) = if knobs.frequency_min > 0.0 {
            (true, super_rate / knobs.frequency_min)
        } else {
            (false, 100_000.0)
        };
        // same expression shape as the translation table's open value, so
        // a translated fully-open knob compares equal here
        let low_pass_open_hz = super_rate * 0.1 / (1.0 - 0.1) / (2.0 * PI);
        let lpf_c = 2.0 * PI * knobs.low_pass_frequency / super_rate;
        let hpf_c = 2.0 * PI * knobs.high_pass_frequency / super_rate;
        let fltw = lpf_c / (1.0 + lpf_c);

        let start = OscillatorState {
            period: super_rate / knobs.frequency,
            period_max,
            cutoff_enabled,
            period_mult: 0.5f64.powf(knobs.frequency_slide / TICK_RATE),
            period_mult_slide: -knobs.frequency_delta_slide * std::f64::consts::LN_2
                / (TICK_RATE * TICK_RATE),
            duty_cycle: knobs.duty_cycle / 100.0,
            duty_cycle_slide: knobs.duty_cycle_sweep / (100.0 * TICK_RATE),
            arpeggio_multiplier: 1.0 / knobs.arpeggio_multiplier,
            arpeggio_time: if knobs.arpeggio_rate > 0.0 {
                (TICK_RATE / knobs.arpeggio_rate) as u64
            } else {
                0
            },
        };

        Self {
            config,
            wave_shape: knobs.wave_type,
            start,
            state: start,
            repeat_time: if knobs.retrigger_rate > 0.0 {
                (TICK_RATE / knobs.retrigger_rate) as u64
            } else {
                0
            },
            elapsed_since_repeat: 0,
            envelope_length: [
                (knobs.attack * TICK_RATE) as u64,
                (knobs.sustain * TICK_RATE) as u64,
                (knobs.decay * TICK_RATE) as u64,
            ],
            envelope_punch: knobs.punch / 100.0,
            vibrato_speed: 2.0 * PI * knobs.vibrato_rate / TICK_RATE,
            vibrato_amplitude: knobs.vibrato_depth / 100.0,
            low_pass_enabled: knobs.low_pass_frequency < low_pass_open_hz,
            fltw,
            fltw_d: knobs.low_pass_sweep.powf(1.0 / TICK_RATE),
            fltdmp: (5.0 * (knobs.low_pass_resonance / 100.0) * (0.01 + fltw)).min(0.8),
            flthp: hpf_c / (1.0 + hpf_c),
            flthp_d: knobs.high_pass_sweep.powf(1.0 / TICK_RATE),
            flanger_offset: knobs.flanger_offset / 1000.0 * super_rate,
            flanger_offset_slide: knobs.flanger_sweep / 1000.0 * super_rate / TICK_RATE,
            gain: 10.0f64.powf(knobs.gain / 20.0),
            sample_rate: knobs.sample_rate,
            sample_size: knobs.sample_size,
        }
    }

    /// Restores the oscillator constants captured at construction.
    fn retrigger(&mut self) {
        self.elapsed_since_repeat = 0;
        self.state = self.start;
    }

    /// Runs the sample loop to completion and returns the finished buffer.
    ///
    /// The loop ends when the decay stage elapses, when the
    /// minimum-frequency cutoff fires, or at [`MAX_TICKS`]. The injected
    /// RNG feeds only the noise oscillator; non-noise shapes never draw
    /// from it during the loop (the initial table fill aside), so equal
    /// parameters produce equal buffers.
    pub fn generate(mut self, rng: &mut Pcg32) -> SampleBuffer {
        let oversampling = self.config.oversampling.max(1);
        let summands = ((TICK_RATE as u32) / self.sample_rate.max(1)).max(1) as usize;

        let mut noise_table = [0.0f64; NOISE_TABLE_LEN];
        refill_noise(&mut noise_table, rng);

        let mut envelope_stage = 0usize;
        let mut envelope_elapsed: u64 = 0;

        let mut vibrato_phase = 0.0f64;

        let mut phase: u64 = 0;
        let mut flanger_buffer = [0.0f64; FLANGER_BUFFER_LEN];
        let mut flanger_pos = 0usize;

        // filter state: low-pass value, its delta, high-pass accumulator
        let mut fltp = 0.0f64;
        let mut fltdp = 0.0f64;
        let mut fltphp = 0.0f64;

        let mut pcm: Vec<u8> = Vec::new();
        let mut normalized: Vec<f32> = Vec::new();
        let mut clipped = 0usize;
        let mut truncated = false;

        let mut sample_sum = 0.0f64;
        let mut num_summed = 0usize;

        let mut tick: u64 = 0;
        loop {
            if tick >= MAX_TICKS {
                truncated = true;
                break;
            }

            // retrigger
            if self.repeat_time != 0 {
                self.elapsed_since_repeat += 1;
                if self.elapsed_since_repeat >= self.repeat_time {
                    self.retrigger();
                }
            }

            // one-shot arpeggio pitch change
            if self.state.arpeggio_time != 0 && tick >= self.state.arpeggio_time {
                self.state.arpeggio_time = 0;
                self.state.period *= self.state.arpeggio_multiplier;
            }

            // frequency slide, and the slide of the slide
            self.state.period_mult += self.state.period_mult_slide;
            self.state.period *= self.state.period_mult;
            if self.state.period > self.state.period_max {
                self.state.period = self.state.period_max;
                if self.state.cutoff_enabled {
                    break;
                }
            }

            // vibrato
            let mut rperiod = self.state.period;
            if self.vibrato_amplitude > 0.0 {
                vibrato_phase += self.vibrato_speed;
                rperiod =
                    self.state.period * (1.0 + vibrato_phase.sin() * self.vibrato_amplitude);
            }
            let iperiod = (rperiod.floor() as u64).max(oversampling as u64);

            // duty cycle slide
            self.state.duty_cycle =
                (self.state.duty_cycle + self.state.duty_cycle_slide).clamp(0.0, 0.5);

            // volume envelope
            envelope_elapsed += 1;
            if envelope_elapsed > self.envelope_length[envelope_stage] {
                envelope_elapsed = 0;
                envelope_stage += 1;
                if envelope_stage > 2 {
                    break;
                }
            }
            let stage_length = self.envelope_length[envelope_stage];
            // a zero-length stage is instantly complete
            let envf = if stage_length == 0 {
                1.0
            } else {
                envelope_elapsed as f64 / stage_length as f64
            };
            let env_vol = match envelope_stage {
                0 => envf,
                1 => 1.0 + (1.0 - envf) * 2.0 * self.envelope_punch,
                _ => 1.0 - envf,
            };

            // flanger offset step
            self.flanger_offset += self.flanger_offset_slide;
            let flanger_tap =
                (self.flanger_offset.floor().abs() as usize).min(FLANGER_BUFFER_LEN - 1);

            // high-pass cutoff sweep
            if self.flthp_d != 0.0 {
                self.flthp = (self.flthp * self.flthp_d).clamp(0.00001, 0.1);
            }

            // oversampled waveform, filters, and flanger
            let mut sample = 0.0f64;
            for _ in 0..oversampling {
                phase += 1;
                if phase >= iperiod {
                    phase %= iperiod;
                    if self.wave_shape == WaveShape::Noise {
                        refill_noise(&mut noise_table, rng);
                    }
                }

                let fp = phase as f64 / iperiod as f64;
                let mut sub_sample = match self.wave_shape {
                    WaveShape::Square => {
                        if fp < self.state.duty_cycle {
                            0.5
                        } else {
                            -0.5
                        }
                    }
                    WaveShape::Sawtooth => {
                        if fp < self.state.duty_cycle {
                            -1.0 + 2.0 * fp / self.state.duty_cycle
                        } else {
                            1.0 - 2.0 * (fp - self.state.duty_cycle)
                                / (1.0 - self.state.duty_cycle)
                        }
                    }
                    WaveShape::Sine => (fp * 2.0 * PI).sin(),
                    WaveShape::Noise => {
                        noise_table[(phase * NOISE_TABLE_LEN as u64 / iperiod) as usize]
                    }
                };

                // low-pass filter
                let pp = fltp;
                self.fltw = (self.fltw * self.fltw_d).clamp(0.0, 0.1);
                if self.low_pass_enabled {
                    fltdp += (sub_sample - fltp) * self.fltw;
                    fltdp -= fltdp * self.fltdmp;
                } else {
                    fltp = sub_sample;
                    fltdp = 0.0;
                }
                fltp += fltdp;

                // high-pass filter
                fltphp += fltp - pp;
                fltphp -= fltphp * self.flthp;
                sub_sample = fltphp;

                // flanger tap
                flanger_buffer[flanger_pos] = sub_sample;
                sub_sample += flanger_buffer
                    [(flanger_pos + FLANGER_BUFFER_LEN - flanger_tap) & (FLANGER_BUFFER_LEN - 1)];
                flanger_pos = (flanger_pos + 1) & (FLANGER_BUFFER_LEN - 1);

                sample += sub_sample * env_vol;
            }

            tick += 1;

            // decimate to the output rate
            sample_sum += sample;
            num_summed += 1;
            if num_summed < summands {
                continue;
            }
            sample = sample_sum / summands as f64;
            sample_sum = 0.0;
            num_summed = 0;

            let scaled = sample / oversampling as f64 * self.config.master_volume * self.gain;

            if self.sample_size == 8 {
                // rescale [-1, 1) to [0, 256)
                let mut quantized = ((scaled + 1.0) * 128.0).floor();
                if quantized > 255.0 {
                    quantized = 255.0;
                    clipped += 1;
                } else if quantized < 0.0 {
                    quantized = 0.0;
                    clipped += 1;
                }
                pcm.push(quantized as u8);
                normalized.push((quantized / 128.0 - 1.0) as f32);
            } else {
                // rescale [-1, 1) to [-32768, 32768)
                let mut quantized = (scaled * 32768.0).floor();
                if quantized > 32767.0 {
                    quantized = 32767.0;
                    clipped += 1;
                } else if quantized < -32768.0 {
                    quantized = -32768.0;
                    clipped += 1;
                }
                pcm.extend_from_slice(&(quantized as i16).to_le_bytes());
                normalized.push((quantized / 32768.0) as f32);
            }
        }

        SampleBuffer {
            pcm,
            normalized,
            clipped,
            truncated,
            sample_rate: self.sample_rate,
            sample_size: self.sample_size,
        }
    }
}

fn refill_noise(table: &mut [f64; NOISE_TABLE_LEN], rng: &mut Pcg32) {
    for slot in table.iter_mut() {
        *slot = rng.gen::<f64>() * 2.0 - 1.0;
    }
}
