//! Render command implementation
//!
//! Resolves a parameter source, runs the synthesis engine, and writes a
//! WAV file (or prints a data URI).

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use chipsfx_spec::{base58, presets as registry, HumanParameterSet};
use chipsfx_synth::rng::create_component_rng;
use chipsfx_synth::{render_human, render_raw, SampleBuffer, SynthConfig, WavResult};

use super::load_raw;

/// Inputs for one render invocation.
pub struct RenderRequest {
    /// Preset name source.
    pub preset: Option<String>,
    /// Share string source.
    pub b58: Option<String>,
    /// Parameter file source.
    pub params: Option<String>,
    /// Use the human-units family and construction path.
    pub human: bool,
    /// Number of mutation passes applied to the resolved parameters.
    pub mutate: u32,
    /// Seed for preset draws and noise.
    pub seed: u32,
    /// Output WAV path.
    pub out: String,
    /// Sample rate override.
    pub rate: Option<u32>,
    /// Sample size override.
    pub bits: Option<u16>,
    /// Print a data URI instead of writing a file.
    pub data_uri: bool,
    /// Machine-readable output.
    pub json: bool,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(request: RenderRequest) -> Result<ExitCode> {
    let (buffer, share) = synthesize(&request)?;

    let wav = WavResult::from_buffer(&buffer).context("failed to build WAV container")?;

    if request.data_uri {
        println!("{}", wav.data_uri());
        return Ok(ExitCode::SUCCESS);
    }

    fs::write(&request.out, &wav.wav_data)
        .with_context(|| format!("failed to write: {}", request.out))?;

    if request.json {
        let report = serde_json::json!({
            "out": request.out,
            "duration_seconds": buffer.duration_seconds(),
            "num_samples": buffer.num_samples(),
            "sample_rate": buffer.sample_rate,
            "sample_size": buffer.sample_size,
            "clipped": buffer.clipped,
            "truncated": buffer.truncated,
            "pcm_hash": wav.pcm_hash,
            "share": share,
        });
        println!("{report}");
    } else {
        println!(
            "{} {} ({:.3} s, {} samples, {}-bit @ {} Hz)",
            "Rendered".green().bold(),
            request.out,
            buffer.duration_seconds(),
            buffer.num_samples(),
            buffer.sample_size,
            buffer.sample_rate,
        );
        if buffer.clipped > 0 {
            println!(
                "{} {} samples clipped",
                "WARNING".yellow().bold(),
                buffer.clipped
            );
        }
        if buffer.truncated {
            println!(
                "{} generation hit the tick ceiling and was truncated",
                "WARNING".yellow().bold()
            );
        }
        if let Some(share) = share {
            println!("{} #{share}", "Share:".cyan().bold());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolves the source and runs the matching engine path.
///
/// Returns the finished buffer and, for raw-family sources, the share
/// string (the human family has no base58 form).
fn synthesize(request: &RenderRequest) -> Result<(SampleBuffer, Option<String>)> {
    let config = SynthConfig::default();

    if request.human {
        if request.mutate > 0 {
            bail!("--mutate applies to the raw parameter family only");
        }
        let mut knobs = load_human(request)?;
        if let Some(rate) = request.rate {
            knobs.sample_rate = rate;
        }
        if let Some(bits) = request.bits {
            knobs.sample_size = bits;
        }
        return Ok((render_human(&knobs, config, request.seed), None));
    }

    let mut params = load_raw(
        request.preset.as_deref(),
        request.b58.as_deref(),
        request.params.as_deref(),
        request.seed,
    )?;
    if request.mutate > 0 {
        let mut mutate_rng = create_component_rng(request.seed, "mutate");
        for _ in 0..request.mutate {
            params = registry::mutate(&params, &mut mutate_rng);
        }
    }
    if let Some(rate) = request.rate {
        params.sample_rate = rate;
    }
    if let Some(bits) = request.bits {
        params.sample_size = bits;
    }
    let share = base58::to_b58(&params);
    Ok((render_raw(&params, config, request.seed), Some(share)))
}

/// Resolves a human-units parameter set: drawn from the human preset
/// family for preset sources, translated from the raw set otherwise.
fn load_human(request: &RenderRequest) -> Result<HumanParameterSet> {
    if let (Some(name), None, None) = (
        request.preset.as_deref(),
        request.b58.as_deref(),
        request.params.as_deref(),
    ) {
        let generator = registry::human_preset(name)?;
        let mut preset_rng = create_component_rng(request.seed, "preset");
        return Ok(generator(&mut preset_rng));
    }
    let params = load_raw(
        request.preset.as_deref(),
        request.b58.as_deref(),
        request.params.as_deref(),
        request.seed,
    )?;
    Ok(HumanParameterSet::from_raw(&params))
}
