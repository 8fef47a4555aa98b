//! Regression guards for generation-loop termination.

use chipsfx_spec::presets::raw_preset;
use chipsfx_spec::RawParameterSet;
use chipsfx_synth::rng::create_component_rng;
use chipsfx_synth::{render_raw, SynthConfig, MAX_TICKS};

/// A flat-pitch explosion with retrigger enabled never finds the
/// frequency cutoff; the envelope must still end it well below the tick
/// ceiling.
#[test]
fn test_flat_retriggered_explosion_stays_bounded() {
    let generator = raw_preset("explosion").unwrap();
    for seed in 0..20 {
        let mut preset_rng = create_component_rng(seed, "preset");
        let mut params = generator(&mut preset_rng);
        params.p_freq_ramp = 0.0;
        if params.p_repeat_speed == 0.0 {
            params.p_repeat_speed = 0.5;
        }

        let buffer = render_raw(&params, SynthConfig::default(), seed);
        assert!(!buffer.truncated, "seed {seed}");
        // four seconds is generous for any explosion envelope
        assert!(
            buffer.duration_seconds() < 4.0,
            "seed {seed}: {}",
            buffer.duration_seconds()
        );
    }
}

/// Out-of-range envelope knobs cannot spin the loop forever: the tick
/// ceiling ends generation and reports the truncation.
#[test]
fn test_pathological_envelope_is_truncated_not_hung() {
    let mut params = RawParameterSet::default();
    params.p_env_sustain = 25.0;
    params.p_freq_limit = 0.0;

    let buffer = render_raw(&params, SynthConfig::default(), 0);
    assert!(buffer.truncated);
    assert_eq!(buffer.num_samples() as u64, MAX_TICKS);
}

/// Stock presets always terminate naturally.
#[test]
fn test_stock_presets_never_truncate() {
    for (name, generator) in chipsfx_spec::presets::RAW_PRESETS {
        for seed in 0..10 {
            let mut preset_rng = create_component_rng(seed, "preset");
            let params = generator(&mut preset_rng);
            let buffer = render_raw(&params, SynthConfig::default(), seed);
            assert!(!buffer.truncated, "preset {name}, seed {seed}");
        }
    }
}
