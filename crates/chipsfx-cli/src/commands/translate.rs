//! Translate command implementation
//!
//! Resolves a raw parameter source and prints the human-units view.

use anyhow::{Context, Result};
use std::process::ExitCode;

use chipsfx_spec::HumanParameterSet;

use super::load_raw;

/// Run the translate command
///
/// # Arguments
/// * `preset` / `b58` / `params_path` - exactly one parameter source
/// * `seed` - RNG seed for preset draws
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    preset: Option<&str>,
    b58: Option<&str>,
    params_path: Option<&str>,
    seed: u32,
) -> Result<ExitCode> {
    let params = load_raw(preset, b58, params_path, seed)?;
    let knobs = HumanParameterSet::from_raw(&params);

    let json = serde_json::to_string_pretty(&knobs).context("failed to serialize knobs")?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}
