//! Presets command implementation
//!
//! Lists the registered preset names.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use chipsfx_spec::presets::preset_names;

/// Run the presets command
///
/// # Returns
/// Exit code: 0 success
pub fn run() -> Result<ExitCode> {
    println!("{}", "Presets:".cyan().bold());
    for name in preset_names() {
        println!("  {name}");
    }
    println!("  mutate (transforms an existing parameter set)");
    Ok(ExitCode::SUCCESS)
}
