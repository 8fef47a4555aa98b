//! chipsfx CLI - render sfxr-style sound effects from the command line
//!
//! This binary provides commands for rendering presets, share strings,
//! and parameter files to WAV, and for converting between the parameter
//! representations.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

mod commands;

/// chipsfx - Procedural Sound Effect Synthesizer
#[derive(Parser)]
#[command(name = "chipsfx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sound to a WAV file or data URI
    Render {
        /// Preset name to draw parameters from (see `presets`)
        #[arg(short, long)]
        preset: Option<String>,

        /// Base58 share string (optionally #-prefixed)
        #[arg(long)]
        b58: Option<String>,

        /// Path to a parameter JSON file
        #[arg(long)]
        params: Option<String>,

        /// Use the human-units preset family and construction path
        #[arg(long)]
        human: bool,

        /// Number of mutation passes to apply to the resolved parameters
        #[arg(short, long, default_value_t = 0)]
        mutate: u32,

        /// RNG seed for preset draws and the noise oscillator
        #[arg(short, long, default_value_t = 42)]
        seed: u32,

        /// Output WAV path
        #[arg(short, long, default_value = "out.wav")]
        out: String,

        /// Override the output sample rate in Hz
        #[arg(long)]
        rate: Option<u32>,

        /// Override the output sample size in bits (8 or 16)
        #[arg(long)]
        bits: Option<u16>,

        /// Print the data: URI to stdout instead of writing a file
        #[arg(long)]
        data_uri: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List registered preset names
    Presets,

    /// Encode a parameter JSON file as a base58 share string
    Encode {
        /// Path to a parameter JSON file
        #[arg(long)]
        params: String,
    },

    /// Decode a base58 share string to parameter JSON
    Decode {
        /// Base58 share string (optionally #-prefixed)
        #[arg(long)]
        b58: String,

        /// Pretty-print the output JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Translate parameters to human units (Hz, seconds, percent, dB)
    Translate {
        /// Preset name to draw parameters from
        #[arg(short, long)]
        preset: Option<String>,

        /// Base58 share string (optionally #-prefixed)
        #[arg(long)]
        b58: Option<String>,

        /// Path to a parameter JSON file
        #[arg(long)]
        params: Option<String>,

        /// RNG seed for preset draws
        #[arg(short, long, default_value_t = 42)]
        seed: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            preset,
            b58,
            params,
            human,
            mutate,
            seed,
            out,
            rate,
            bits,
            data_uri,
            json,
        } => commands::render::run(commands::render::RenderRequest {
            preset,
            b58,
            params,
            human,
            mutate,
            seed,
            out,
            rate,
            bits,
            data_uri,
            json,
        }),
        Commands::Presets => commands::presets::run(),
        Commands::Encode { params } => commands::encode::run(&params),
        Commands::Decode { b58, pretty } => commands::decode::run(&b58, pretty),
        Commands::Translate {
            preset,
            b58,
            params,
            seed,
        } => commands::translate::run(preset.as_deref(), b58.as_deref(), params.as_deref(), seed),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "ERROR".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render_with_preset() {
        let cli = Cli::try_parse_from([
            "chipsfx", "render", "--preset", "laserShoot", "--seed", "7", "--out", "laser.wav",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                preset, seed, out, ..
            } => {
                assert_eq!(preset.as_deref(), Some("laserShoot"));
                assert_eq!(seed, 7);
                assert_eq!(out, "laser.wav");
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_render_defaults() {
        let cli = Cli::try_parse_from(["chipsfx", "render", "--preset", "tone"]).unwrap();
        match cli.command {
            Commands::Render {
                seed,
                out,
                human,
                data_uri,
                json,
                rate,
                bits,
                ..
            } => {
                assert_eq!(seed, 42);
                assert_eq!(out, "out.wav");
                assert!(!human);
                assert!(!data_uri);
                assert!(!json);
                assert!(rate.is_none());
                assert!(bits.is_none());
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_decode() {
        let cli =
            Cli::try_parse_from(["chipsfx", "decode", "--b58", "#abc", "--pretty"]).unwrap();
        match cli.command {
            Commands::Decode { b58, pretty } => {
                assert_eq!(b58, "#abc");
                assert!(pretty);
            }
            _ => panic!("expected decode command"),
        }
    }

    #[test]
    fn test_cli_parses_presets() {
        let cli = Cli::try_parse_from(["chipsfx", "presets"]).unwrap();
        assert!(matches!(cli.command, Commands::Presets));
    }
}
