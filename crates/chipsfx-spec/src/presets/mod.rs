//! Randomized preset generators for both parameter representations.
//!
//! Presets are a contract: the same RNG stream must reproduce the same
//! parameter values, so every generator takes an explicit PCG32 and each
//! draw is documented field by field. The registry is a static table, one
//! entry per name, with lookup by exact name; `mutate` is registered
//! separately because it transforms an existing set instead of creating
//! one.
//!
//! The two families are deliberately parallel, not shared: the raw family
//! draws normalized knob values, the human family draws physical units
//! directly, and both produce qualitatively equivalent sounds per name.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::error::{SpecError, SpecResult};
use crate::knobs::HumanParameterSet;
use crate::params::RawParameterSet;

mod human;
mod raw;

pub use raw::mutate;

/// A raw-family preset generator.
pub type RawPresetFn = fn(&mut Pcg32) -> RawParameterSet;

/// A human-family preset generator.
pub type HumanPresetFn = fn(&mut Pcg32) -> HumanParameterSet;

/// Raw preset registry, in menu order.
pub const RAW_PRESETS: &[(&str, RawPresetFn)] = &[
    ("pickupCoin", raw::pickup_coin),
    ("laserShoot", raw::laser_shoot),
    ("explosion", raw::explosion),
    ("powerUp", raw::power_up),
    ("hitHurt", raw::hit_hurt),
    ("jump", raw::jump),
    ("blipSelect", raw::blip_select),
    ("random", raw::random),
    ("tone", raw::tone),
];

/// Human preset registry, in menu order.
pub const HUMAN_PRESETS: &[(&str, HumanPresetFn)] = &[
    ("pickupCoin", human::pickup_coin),
    ("laserShoot", human::laser_shoot),
    ("explosion", human::explosion),
    ("powerUp", human::power_up),
    ("hitHurt", human::hit_hurt),
    ("jump", human::jump),
    ("blipSelect", human::blip_select),
    ("random", human::random),
    ("tone", human::tone),
];

/// Looks up a raw preset generator by name.
pub fn raw_preset(name: &str) -> SpecResult<RawPresetFn> {
    RAW_PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, generator)| *generator)
        .ok_or_else(|| SpecError::unknown_preset(name))
}

/// Looks up a human preset generator by name.
pub fn human_preset(name: &str) -> SpecResult<HumanPresetFn> {
    HUMAN_PRESETS
        .iter()
        .find(|(preset_name, _)| *preset_name == name)
        .map(|(_, generator)| *generator)
        .ok_or_else(|| SpecError::unknown_preset(name))
}

/// Returns the registered preset names, in menu order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    RAW_PRESETS.iter().map(|(name, _)| *name)
}

/// Uniform draw on `[0, range)`.
fn frnd(rng: &mut Pcg32, range: f64) -> f64 {
    rng.gen::<f64>() * range
}

/// Uniform integer draw on `0..=n`; `rnd(rng, 1)` is the coin flip.
fn rnd(rng: &mut Pcg32, n: u32) -> u32 {
    rng.gen_range(0..=n)
}

fn sqr(x: f64) -> f64 {
    x * x
}

fn cube(x: f64) -> f64 {
    x * x * x
}

fn pow5(x: f64) -> f64 {
    let squared = x * x;
    squared * squared * x
}
