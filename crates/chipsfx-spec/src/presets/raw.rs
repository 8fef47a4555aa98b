//! The raw preset family: normalized-knob recipes.
//!
//! Each generator starts from the defaults and overwrites a fixed subset
//! of knobs with draws from the distributions noted inline. Branches are
//! taken with the stated probabilities; draw order is part of the
//! contract and must not be reordered.

use rand_pcg::Pcg32;

use crate::params::{RawParameterSet, WaveShape};

use super::{cube, frnd, pow5, rnd, sqr};

/// Coin pickup: mid-to-high square blip with punch, half the time with an
/// upward arpeggio chirp.
pub fn pickup_coin(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.p_base_freq = 0.4 + frnd(rng, 0.5);
    p.p_env_attack = 0.0;
    p.p_env_sustain = frnd(rng, 0.1);
    p.p_env_decay = 0.1 + frnd(rng, 0.4);
    p.p_env_punch = 0.3 + frnd(rng, 0.3);
    if rnd(rng, 1) == 1 {
        p.p_arp_speed = 0.5 + frnd(rng, 0.2);
        p.p_arp_mod = 0.2 + frnd(rng, 0.4);
    }
    p
}

/// Laser shot: descending zap on square, sawtooth, or (rarely) sine.
pub fn laser_shoot(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = match rnd(rng, 2) {
        0 => WaveShape::Square,
        1 => WaveShape::Sawtooth,
        _ => WaveShape::Sine,
    };
    // sine survives only one of two re-rolls
    if p.wave_type == WaveShape::Sine && rnd(rng, 1) == 1 {
        p.wave_type = if rnd(rng, 1) == 1 {
            WaveShape::Sawtooth
        } else {
            WaveShape::Square
        };
    }
    if rnd(rng, 2) == 0 {
        // 1 in 3: steep dive with a low floor
        p.p_base_freq = 0.3 + frnd(rng, 0.6);
        p.p_freq_limit = frnd(rng, 0.1);
        p.p_freq_ramp = -0.35 - frnd(rng, 0.3);
    } else {
        // shallower dive, floor tied to the start pitch
        p.p_base_freq = 0.5 + frnd(rng, 0.5);
        p.p_freq_limit = (p.p_base_freq - 0.2 - frnd(rng, 0.6)).max(0.0);
        p.p_freq_ramp = -0.15 - frnd(rng, 0.2);
    }
    if rnd(rng, 1) == 1 {
        p.p_duty = frnd(rng, 0.5);
        p.p_duty_ramp = frnd(rng, 0.2);
    } else {
        p.p_duty = 0.4 + frnd(rng, 0.5);
        p.p_duty_ramp = -frnd(rng, 0.7);
    }
    p.p_env_attack = 0.0;
    p.p_env_sustain = 0.1 + frnd(rng, 0.2);
    p.p_env_decay = frnd(rng, 0.4);
    if rnd(rng, 1) == 1 {
        p.p_env_punch = frnd(rng, 0.3);
    }
    if rnd(rng, 2) == 0 {
        p.p_pha_offset = frnd(rng, 0.2);
        p.p_pha_ramp = -frnd(rng, 0.2);
    }
    p.p_hpf_freq = frnd(rng, 0.3);
    p
}

/// Explosion: noise burst, optionally retriggered, with punch and a
/// chance of vibrato or a detuning arpeggio.
pub fn explosion(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = WaveShape::Noise;
    if rnd(rng, 1) == 1 {
        p.p_base_freq = sqr(0.1 + frnd(rng, 0.4));
        p.p_freq_ramp = -0.1 + frnd(rng, 0.4);
    } else {
        p.p_base_freq = sqr(0.2 + frnd(rng, 0.7));
        p.p_freq_ramp = -0.2 - frnd(rng, 0.2);
    }
    if rnd(rng, 4) == 0 {
        p.p_freq_ramp = 0.0;
    }
    if rnd(rng, 2) == 0 {
        p.p_repeat_speed = 0.3 + frnd(rng, 0.5);
    }
    p.p_env_attack = 0.0;
    p.p_env_sustain = 0.1 + frnd(rng, 0.3);
    p.p_env_decay = frnd(rng, 0.5);
    if rnd(rng, 1) == 0 {
        p.p_pha_offset = -0.3 + frnd(rng, 0.9);
        p.p_pha_ramp = -frnd(rng, 0.3);
    }
    p.p_env_punch = 0.2 + frnd(rng, 0.6);
    if rnd(rng, 1) == 1 {
        p.p_vib_strength = frnd(rng, 0.7);
        p.p_vib_speed = frnd(rng, 0.6);
    }
    if rnd(rng, 2) == 0 {
        p.p_arp_speed = 0.6 + frnd(rng, 0.3);
        p.p_arp_mod = 0.8 - frnd(rng, 1.6);
    }
    p
}

/// Power-up: rising tone, either stepped by retrigger or smoothed with
/// optional vibrato.
pub fn power_up(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    if rnd(rng, 1) == 1 {
        p.wave_type = WaveShape::Sawtooth;
    } else {
        p.p_duty = frnd(rng, 0.6);
    }
    if rnd(rng, 1) == 1 {
        p.p_base_freq = 0.2 + frnd(rng, 0.3);
        p.p_freq_ramp = 0.1 + frnd(rng, 0.4);
        p.p_repeat_speed = 0.4 + frnd(rng, 0.4);
    } else {
        p.p_base_freq = 0.2 + frnd(rng, 0.3);
        p.p_freq_ramp = 0.05 + frnd(rng, 0.2);
        if rnd(rng, 1) == 1 {
            p.p_vib_strength = frnd(rng, 0.7);
            p.p_vib_speed = frnd(rng, 0.6);
        }
    }
    p.p_env_attack = 0.0;
    p.p_env_sustain = frnd(rng, 0.4);
    p.p_env_decay = 0.1 + frnd(rng, 0.4);
    p
}

/// Hit/hurt: short falling burst on square, sawtooth, or noise.
pub fn hit_hurt(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = match rnd(rng, 2) {
        0 => WaveShape::Square,
        1 => WaveShape::Sawtooth,
        _ => WaveShape::Noise,
    };
    if p.wave_type == WaveShape::Square {
        p.p_duty = frnd(rng, 0.6);
    }
    p.p_base_freq = 0.2 + frnd(rng, 0.6);
    p.p_freq_ramp = -0.3 - frnd(rng, 0.4);
    p.p_env_attack = 0.0;
    p.p_env_sustain = frnd(rng, 0.1);
    p.p_env_decay = 0.1 + frnd(rng, 0.2);
    if rnd(rng, 1) == 1 {
        p.p_hpf_freq = frnd(rng, 0.3);
    }
    p
}

/// Jump: rising square blip, sometimes filtered at either end.
pub fn jump(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = WaveShape::Square;
    p.p_duty = frnd(rng, 0.6);
    p.p_base_freq = 0.3 + frnd(rng, 0.3);
    p.p_freq_ramp = 0.1 + frnd(rng, 0.2);
    p.p_env_attack = 0.0;
    p.p_env_sustain = 0.1 + frnd(rng, 0.3);
    p.p_env_decay = 0.1 + frnd(rng, 0.2);
    if rnd(rng, 1) == 1 {
        p.p_hpf_freq = frnd(rng, 0.3);
    }
    if rnd(rng, 1) == 1 {
        p.p_lpf_freq = 1.0 - frnd(rng, 0.6);
    }
    p
}

/// Blip/select: very short square or sawtooth tick, high-passed.
pub fn blip_select(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = if rnd(rng, 1) == 1 {
        WaveShape::Sawtooth
    } else {
        WaveShape::Square
    };
    if p.wave_type == WaveShape::Square {
        p.p_duty = frnd(rng, 0.6);
    }
    p.p_base_freq = 0.2 + frnd(rng, 0.4);
    p.p_env_attack = 0.0;
    p.p_env_sustain = 0.1 + frnd(rng, 0.1);
    p.p_env_decay = frnd(rng, 0.2);
    p.p_hpf_freq = 0.1;
    p
}

/// Fully randomized parameters with shape and range guards.
///
/// Power-shaped draws (square, cube, fifth power of a symmetric uniform)
/// bias values toward zero; the ramp guards flip the frequency slide to
/// oppose extreme base frequencies, and the envelope guard keeps the
/// total length audible.
pub fn random(rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = match rnd(rng, 3) {
        0 => WaveShape::Square,
        1 => WaveShape::Sawtooth,
        2 => WaveShape::Sine,
        _ => WaveShape::Noise,
    };
    p.p_base_freq = sqr(frnd(rng, 2.0) - 1.0);
    if rnd(rng, 1) == 1 {
        p.p_base_freq = cube(frnd(rng, 2.0) - 1.0) + 0.5;
    }
    p.p_freq_limit = 0.0;
    p.p_freq_ramp = pow5(frnd(rng, 2.0) - 1.0);
    if p.p_base_freq > 0.7 && p.p_freq_ramp > 0.2 {
        p.p_freq_ramp = -p.p_freq_ramp;
    }
    if p.p_base_freq < 0.2 && p.p_freq_ramp < -0.05 {
        p.p_freq_ramp = -p.p_freq_ramp;
    }
    p.p_freq_dramp = cube(frnd(rng, 2.0) - 1.0);
    p.p_duty = frnd(rng, 2.0) - 1.0;
    p.p_duty_ramp = cube(frnd(rng, 2.0) - 1.0);
    p.p_vib_strength = cube(frnd(rng, 2.0) - 1.0);
    p.p_vib_speed = frnd(rng, 2.0) - 1.0;
    p.p_env_attack = cube(frnd(rng, 2.0) - 1.0);
    p.p_env_sustain = sqr(frnd(rng, 2.0) - 1.0);
    p.p_env_decay = frnd(rng, 2.0) - 1.0;
    p.p_env_punch = sqr(frnd(rng, 0.8));
    if p.p_env_attack + p.p_env_sustain + p.p_env_decay < 0.2 {
        p.p_env_sustain += 0.2 + frnd(rng, 0.3);
        p.p_env_decay += 0.2 + frnd(rng, 0.3);
    }
    p.p_lpf_resonance = frnd(rng, 2.0) - 1.0;
    p.p_lpf_freq = 1.0 - cube(frnd(rng, 1.0));
    p.p_lpf_ramp = cube(frnd(rng, 2.0) - 1.0);
    if p.p_lpf_freq < 0.1 && p.p_lpf_ramp < -0.05 {
        p.p_lpf_ramp = -p.p_lpf_ramp;
    }
    p.p_hpf_freq = pow5(frnd(rng, 1.0));
    p.p_hpf_ramp = pow5(frnd(rng, 2.0) - 1.0);
    p.p_pha_offset = cube(frnd(rng, 2.0) - 1.0);
    p.p_pha_ramp = cube(frnd(rng, 2.0) - 1.0);
    p.p_repeat_speed = frnd(rng, 2.0) - 1.0;
    p.p_arp_speed = frnd(rng, 2.0) - 1.0;
    p.p_arp_mod = frnd(rng, 2.0) - 1.0;
    p
}

/// Reference tone: pure 440 Hz sine, one second of sustain, no decay, no
/// punch. Deterministic; the RNG is untouched.
pub fn tone(_rng: &mut Pcg32) -> RawParameterSet {
    let mut p = RawParameterSet::default();
    p.wave_type = WaveShape::Sine;
    p.p_base_freq = 0.35173364;
    p.p_env_attack = 0.0;
    p.p_env_sustain = 0.6641;
    p.p_env_decay = 0.0;
    p.p_env_punch = 0.0;
    p
}

fn nudge(rng: &mut Pcg32, value: f64) -> f64 {
    if rnd(rng, 1) == 1 {
        value + frnd(rng, 0.1) - 0.05
    } else {
        value
    }
}

/// Perturbs every float knob by up to +-0.05, each behind an independent
/// coin flip. The wave shape and output settings are left alone.
pub fn mutate(source: &RawParameterSet, rng: &mut Pcg32) -> RawParameterSet {
    let mut p = source.clone();
    p.p_env_attack = nudge(rng, p.p_env_attack);
    p.p_env_sustain = nudge(rng, p.p_env_sustain);
    p.p_env_punch = nudge(rng, p.p_env_punch);
    p.p_env_decay = nudge(rng, p.p_env_decay);
    p.p_base_freq = nudge(rng, p.p_base_freq);
    p.p_freq_limit = nudge(rng, p.p_freq_limit);
    p.p_freq_ramp = nudge(rng, p.p_freq_ramp);
    p.p_freq_dramp = nudge(rng, p.p_freq_dramp);
    p.p_vib_strength = nudge(rng, p.p_vib_strength);
    p.p_vib_speed = nudge(rng, p.p_vib_speed);
    p.p_arp_mod = nudge(rng, p.p_arp_mod);
    p.p_arp_speed = nudge(rng, p.p_arp_speed);
    p.p_duty = nudge(rng, p.p_duty);
    p.p_duty_ramp = nudge(rng, p.p_duty_ramp);
    p.p_repeat_speed = nudge(rng, p.p_repeat_speed);
    p.p_pha_offset = nudge(rng, p.p_pha_offset);
    p.p_pha_ramp = nudge(rng, p.p_pha_ramp);
    p.p_lpf_freq = nudge(rng, p.p_lpf_freq);
    p.p_lpf_ramp = nudge(rng, p.p_lpf_ramp);
    p.p_lpf_resonance = nudge(rng, p.p_lpf_resonance);
    p.p_hpf_freq = nudge(rng, p.p_hpf_freq);
    p.p_hpf_ramp = nudge(rng, p.p_hpf_ramp);
    p
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_tone_is_deterministic() {
        let p = tone(&mut rng(1));
        let q = tone(&mut rng(999));
        assert_eq!(p, q);
        assert_eq!(p.wave_type, WaveShape::Sine);
        assert_eq!(p.p_env_attack, 0.0);
        assert_eq!(p.p_env_punch, 0.0);
        assert_eq!(p.p_env_decay, 0.0);
    }

    #[test]
    fn test_pickup_coin_ranges() {
        for seed in 0..50 {
            let p = pickup_coin(&mut rng(seed));
            assert!((0.4..0.9).contains(&p.p_base_freq));
            assert!((0.0..0.1).contains(&p.p_env_sustain));
            assert!((0.1..0.5).contains(&p.p_env_decay));
            assert!((0.3..0.6).contains(&p.p_env_punch));
            assert_eq!(p.p_env_attack, 0.0);
            assert_eq!(p.wave_type, WaveShape::Square);
            if p.p_arp_mod != 0.0 {
                assert!((0.2..0.6).contains(&p.p_arp_mod));
                assert!((0.5..0.7).contains(&p.p_arp_speed));
            }
        }
    }

    #[test]
    fn test_laser_shoot_always_descends() {
        for seed in 0..50 {
            let p = laser_shoot(&mut rng(seed));
            assert!(p.p_freq_ramp < 0.0, "seed {seed}");
            assert!(p.p_freq_limit >= 0.0, "seed {seed}");
            assert_eq!(p.p_env_attack, 0.0);
        }
    }

    #[test]
    fn test_explosion_is_noise() {
        for seed in 0..50 {
            let p = explosion(&mut rng(seed));
            assert_eq!(p.wave_type, WaveShape::Noise);
            assert!((0.2..0.8).contains(&p.p_env_punch));
        }
    }

    #[test]
    fn test_hit_hurt_never_picks_sine() {
        for seed in 0..100 {
            let p = hit_hurt(&mut rng(seed));
            assert_ne!(p.wave_type, WaveShape::Sine, "seed {seed}");
        }
    }

    #[test]
    fn test_jump_rises() {
        for seed in 0..50 {
            let p = jump(&mut rng(seed));
            assert_eq!(p.wave_type, WaveShape::Square);
            assert!(p.p_freq_ramp > 0.0);
        }
    }

    #[test]
    fn test_blip_select_high_pass_is_fixed() {
        for seed in 0..50 {
            let p = blip_select(&mut rng(seed));
            assert_eq!(p.p_hpf_freq, 0.1);
            assert!(matches!(
                p.wave_type,
                WaveShape::Square | WaveShape::Sawtooth
            ));
        }
    }

    #[test]
    fn test_random_guards_hold() {
        for seed in 0..200 {
            let p = random(&mut rng(seed));
            assert_eq!(p.p_freq_limit, 0.0);
            if p.p_base_freq > 0.7 {
                assert!(p.p_freq_ramp <= 0.2, "seed {seed}");
            }
            if p.p_base_freq < 0.2 {
                assert!(p.p_freq_ramp >= -0.05, "seed {seed}");
            }
            if p.p_lpf_freq < 0.1 {
                assert!(p.p_lpf_ramp >= -0.05, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_mutate_moves_fields_by_at_most_the_step() {
        let source = tone(&mut rng(0));
        for seed in 0..50 {
            let mutated = mutate(&source, &mut rng(seed));
            assert_eq!(mutated.wave_type, source.wave_type);
            assert_eq!(mutated.sound_vol, source.sound_vol);
            let before = source.wire_floats();
            let after = mutated.wire_floats();
            for (b, a) in before.iter().zip(after.iter()) {
                assert!((a - b).abs() <= 0.05 + 1e-12);
            }
        }
    }

    #[test]
    fn test_mutate_changes_something_eventually() {
        let source = tone(&mut rng(0));
        let mut r = rng(3);
        let changed = (0..10).any(|_| mutate(&source, &mut r) != source);
        assert!(changed);
    }
}
