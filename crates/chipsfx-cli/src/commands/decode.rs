//! Decode command implementation
//!
//! Decodes a base58 share string and prints the parameters as JSON.

use anyhow::{Context, Result};
use std::process::ExitCode;

use chipsfx_spec::base58;

/// Run the decode command
///
/// # Arguments
/// * `share` - Base58 share string, optionally #-prefixed
/// * `pretty` - Pretty-print the output JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(share: &str, pretty: bool) -> Result<ExitCode> {
    let params = base58::from_b58(share).context("failed to decode share string")?;

    if pretty {
        println!("{}", params.to_json_pretty());
    } else {
        println!("{}", params.to_json());
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipsfx_spec::RawParameterSet;

    #[test]
    fn test_decode_accepts_encoded_defaults() {
        let share = base58::to_b58(&RawParameterSet::default());
        run(&share, false).unwrap();
        run(&format!("#{share}"), true).unwrap();
    }

    #[test]
    fn test_decode_rejects_bad_characters() {
        assert!(run("0O0O", false).is_err());
    }
}
