//! Encode command implementation
//!
//! Reads a parameter JSON file and prints its base58 share string.

use anyhow::{Context, Result};
use std::fs;
use std::process::ExitCode;

use chipsfx_spec::{base58, RawParameterSet};

/// Run the encode command
///
/// # Arguments
/// * `params_path` - Path to the parameter JSON file
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(params_path: &str) -> Result<ExitCode> {
    let json = fs::read_to_string(params_path)
        .with_context(|| format!("failed to read parameter file: {params_path}"))?;
    let params = RawParameterSet::from_json(&json)
        .with_context(|| format!("failed to parse parameter file: {params_path}"))?;

    println!("#{}", base58::to_b58(&params));
    Ok(ExitCode::SUCCESS)
}
