//! The human preset family: recipes drawn directly in physical units.
//!
//! Mirrors the raw family name for name and branch for branch, but every
//! draw is made in Hz, seconds, percent, or dB. The two families are
//! qualitatively equivalent, not bit-identical; keeping them separate
//! means each can be tuned in its own units without touching the other.

use rand_pcg::Pcg32;

use crate::knobs::HumanParameterSet;
use crate::params::WaveShape;

use super::{cube, frnd, pow5, rnd, sqr};

/// Coin pickup: bright blip between roughly 570 Hz and 2.9 kHz, heavy
/// punch, half the time with an upward arpeggio step.
pub fn pickup_coin(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.frequency = 570.0 + frnd(rng, 2290.0);
    k.attack = 0.0;
    k.sustain = frnd(rng, 0.025);
    k.decay = 0.02 + frnd(rng, 0.55);
    k.punch = 30.0 + frnd(rng, 30.0);
    if rnd(rng, 1) == 1 {
        k.arpeggio_multiplier = 1.05 + frnd(rng, 0.45);
        k.arpeggio_rate = 9.0 + frnd(rng, 15.0);
    }
    k
}

/// Laser shot: fast downward sweep, a third of the time diving steeply
/// toward a near-zero floor.
pub fn laser_shoot(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = match rnd(rng, 2) {
        0 => WaveShape::Square,
        1 => WaveShape::Sawtooth,
        _ => WaveShape::Sine,
    };
    if k.wave_type == WaveShape::Sine && rnd(rng, 1) == 1 {
        k.wave_type = if rnd(rng, 1) == 1 {
            WaveShape::Sawtooth
        } else {
            WaveShape::Square
        };
    }
    if rnd(rng, 2) == 0 {
        k.frequency = 320.0 + frnd(rng, 2540.0);
        k.frequency_min = frnd(rng, 40.0);
        k.frequency_slide = -(25.0 + frnd(rng, 150.0));
    } else {
        k.frequency = 885.0 + frnd(rng, 2650.0);
        k.frequency_min = (k.frequency * 0.3 - frnd(rng, 800.0)).max(0.0);
        k.frequency_slide = -(2.0 + frnd(rng, 25.0));
    }
    if rnd(rng, 1) == 1 {
        k.duty_cycle = 25.0 + frnd(rng, 25.0);
        k.duty_cycle_sweep = -frnd(rng, 45.0);
    } else {
        k.duty_cycle = 5.0 + frnd(rng, 25.0);
        k.duty_cycle_sweep = frnd(rng, 155.0);
    }
    k.attack = 0.0;
    k.sustain = 0.02 + frnd(rng, 0.18);
    k.decay = frnd(rng, 0.37);
    if rnd(rng, 1) == 1 {
        k.punch = frnd(rng, 30.0);
    }
    if rnd(rng, 2) == 0 {
        k.flanger_offset = frnd(rng, 0.12);
        k.flanger_sweep = -frnd(rng, 5.0);
    }
    k.high_pass_frequency = frnd(rng, 500.0);
    k
}

/// Explosion: low noise rumble, often retriggered, punchy, sometimes
/// wobbling or detuned.
pub fn explosion(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = WaveShape::Noise;
    if rnd(rng, 1) == 1 {
        k.frequency = 4.0 + frnd(rng, 220.0);
        k.frequency_slide = -1.0 + frnd(rng, 18.0);
    } else {
        k.frequency = 14.0 + frnd(rng, 2300.0);
        k.frequency_slide = -(5.0 + frnd(rng, 35.0));
    }
    if rnd(rng, 4) == 0 {
        k.frequency_slide = 0.0;
    }
    if rnd(rng, 2) == 0 {
        k.retrigger_rate = 4.0 + frnd(rng, 49.0);
    }
    k.attack = 0.0;
    k.sustain = 0.02 + frnd(rng, 0.34);
    k.decay = frnd(rng, 0.57);
    if rnd(rng, 1) == 0 {
        k.flanger_offset = -0.25 + frnd(rng, 1.3);
        k.flanger_sweep = -frnd(rng, 11.0);
    }
    k.punch = 20.0 + frnd(rng, 60.0);
    if rnd(rng, 1) == 1 {
        k.vibrato_depth = frnd(rng, 35.0);
        k.vibrato_rate = frnd(rng, 25.0);
    }
    if rnd(rng, 2) == 0 {
        k.arpeggio_multiplier = 0.15 + frnd(rng, 2.2);
        k.arpeggio_rate = 13.0 + frnd(rng, 175.0);
    }
    k
}

/// Power-up: rising tone, either stepped by retrigger or smooth with
/// optional vibrato.
pub fn power_up(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    if rnd(rng, 1) == 1 {
        k.wave_type = WaveShape::Sawtooth;
    } else {
        k.duty_cycle = 20.0 + frnd(rng, 30.0);
    }
    if rnd(rng, 1) == 1 {
        k.frequency = 144.0 + frnd(rng, 740.0);
        k.frequency_slide = 0.5 + frnd(rng, 78.0);
        k.retrigger_rate = 6.0 + frnd(rng, 47.0);
    } else {
        k.frequency = 144.0 + frnd(rng, 740.0);
        k.frequency_slide = frnd(rng, 10.0);
        if rnd(rng, 1) == 1 {
            k.vibrato_depth = frnd(rng, 35.0);
            k.vibrato_rate = frnd(rng, 25.0);
        }
    }
    k.attack = 0.0;
    k.sustain = frnd(rng, 0.36);
    k.decay = 0.02 + frnd(rng, 0.55);
    k
}

/// Hit/hurt: short falling burst on square, sawtooth, or noise.
pub fn hit_hurt(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = match rnd(rng, 2) {
        0 => WaveShape::Square,
        1 => WaveShape::Sawtooth,
        _ => WaveShape::Noise,
    };
    if k.wave_type == WaveShape::Square {
        k.duty_cycle = 20.0 + frnd(rng, 30.0);
    }
    k.frequency = 144.0 + frnd(rng, 2120.0);
    k.frequency_slide = -(17.0 + frnd(rng, 205.0));
    k.attack = 0.0;
    k.sustain = frnd(rng, 0.025);
    k.decay = 0.02 + frnd(rng, 0.18);
    if rnd(rng, 1) == 1 {
        k.high_pass_frequency = frnd(rng, 500.0);
    }
    k
}

/// Jump: rising square blip, sometimes filtered at either end.
pub fn jump(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = WaveShape::Square;
    k.duty_cycle = 20.0 + frnd(rng, 30.0);
    k.frequency = 321.0 + frnd(rng, 950.0);
    k.frequency_slide = 0.6 + frnd(rng, 17.0);
    k.attack = 0.0;
    k.sustain = 0.02 + frnd(rng, 0.34);
    k.decay = 0.02 + frnd(rng, 0.18);
    if rnd(rng, 1) == 1 {
        k.high_pass_frequency = frnd(rng, 500.0);
    }
    if rnd(rng, 1) == 1 {
        k.low_pass_frequency = 360.0 + frnd(rng, 5800.0);
    }
    k
}

/// Blip/select: very short tick with a fixed gentle high-pass.
pub fn blip_select(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = if rnd(rng, 1) == 1 {
        WaveShape::Sawtooth
    } else {
        WaveShape::Square
    };
    if k.wave_type == WaveShape::Square {
        k.duty_cycle = 20.0 + frnd(rng, 30.0);
    }
    k.frequency = 144.0 + frnd(rng, 1130.0);
    k.attack = 0.0;
    k.sustain = 0.02 + frnd(rng, 0.07);
    k.decay = frnd(rng, 0.09);
    k.high_pass_frequency = 56.0;
    k
}

/// Fully randomized physical parameters with the same shape and range
/// guards as the raw family.
pub fn random(rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = match rnd(rng, 3) {
        0 => WaveShape::Square,
        1 => WaveShape::Sawtooth,
        2 => WaveShape::Sine,
        _ => WaveShape::Noise,
    };
    k.frequency = 10.0 + sqr(frnd(rng, 1.0)) * 3500.0;
    k.frequency_min = 0.0;
    k.frequency_slide = pow5(frnd(rng, 2.0) - 1.0) * 500.0;
    if k.frequency > 2500.0 && k.frequency_slide > 100.0 {
        k.frequency_slide = -k.frequency_slide;
    }
    if k.frequency < 150.0 && k.frequency_slide < -10.0 {
        k.frequency_slide = -k.frequency_slide;
    }
    k.frequency_delta_slide = cube(frnd(rng, 2.0) - 1.0) * 2800.0;
    k.duty_cycle = frnd(rng, 100.0);
    k.duty_cycle_sweep = cube(frnd(rng, 2.0) - 1.0) * 220.0;
    k.vibrato_depth = cube(frnd(rng, 1.0)) * 50.0;
    k.vibrato_rate = frnd(rng, 70.0);
    k.attack = cube(frnd(rng, 1.0)) * 2.26;
    k.sustain = sqr(frnd(rng, 1.0)) * 2.26;
    k.decay = frnd(rng, 2.26);
    k.punch = sqr(frnd(rng, 0.8)) * 100.0;
    if k.attack + k.sustain + k.decay < 0.2 {
        k.sustain += 0.2 + frnd(rng, 0.3);
        k.decay += 0.2 + frnd(rng, 0.3);
    }
    k.low_pass_resonance = frnd(rng, 100.0);
    k.low_pass_frequency = 30.0 + frnd(rng, 6200.0);
    k.low_pass_sweep = (1.0 + cube(frnd(rng, 2.0) - 1.0) * 1e-4).powf(44100.0);
    if k.low_pass_frequency < 360.0 && k.low_pass_sweep < 0.1 {
        k.low_pass_sweep = 1.0 / k.low_pass_sweep;
    }
    k.high_pass_frequency = pow5(frnd(rng, 1.0)) * 6200.0;
    k.high_pass_sweep = (1.0 + pow5(frnd(rng, 2.0) - 1.0) * 3e-4).powf(44100.0);
    k.flanger_offset = cube(frnd(rng, 2.0) - 1.0) * 2.9;
    k.flanger_sweep = cube(frnd(rng, 2.0) - 1.0) * 125.0;
    if rnd(rng, 1) == 1 {
        k.retrigger_rate = 2.0 + frnd(rng, 100.0);
    }
    k.arpeggio_multiplier = 0.1 + frnd(rng, 2.2);
    k.arpeggio_rate = 2.0 + frnd(rng, 50.0);
    k
}

/// Reference tone: pure 440 Hz sine held for one second. Deterministic;
/// the RNG is untouched.
pub fn tone(_rng: &mut Pcg32) -> HumanParameterSet {
    let mut k = HumanParameterSet::default();
    k.wave_type = WaveShape::Sine;
    k.frequency = 440.0;
    k.attack = 0.0;
    k.sustain = 1.0;
    k.decay = 0.0;
    k.punch = 0.0;
    k
}
