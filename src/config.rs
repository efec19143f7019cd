//! Runtime configuration for the demo binary.
//!
//! Accepts either a JSON config file or an image path with CLI overrides.

use crate::pipeline::RenderParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the demo writes its artifacts. All optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub preview_png: Option<PathBuf>,
    pub svg_out: Option<PathBuf>,
    pub sheet_dir: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render_params: RenderParams,
}

/// Read a JSON config file.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

/// Parse command-line arguments.
///
/// `<input>` ending in `.json` is treated as a config file; anything else
/// as an image path. Flags override the parameter defaults.
pub fn parse_cli(program: &str) -> Result<RuntimeConfig, String> {
    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or_else(|| usage(program))?;

    let input_path = PathBuf::from(&input);
    let mut config = if input_path.extension().is_some_and(|ext| ext == "json") {
        load_config(&input_path)?
    } else {
        RuntimeConfig {
            input_path,
            output: OutputConfig::default(),
            render_params: RenderParams::default(),
        }
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--pixels-wide" => {
                config.render_params.pixels_wide = parse_value(program, &mut args, &flag)?
            }
            "--block-size" => {
                config.render_params.block_size = parse_value(program, &mut args, &flag)?
            }
            "--sharp-adjust" => {
                config.render_params.sharp_adjust = parse_value(program, &mut args, &flag)?
            }
            "--outlines" => config.render_params.show_as_outlines = true,
            "--out-dir" => {
                let dir: PathBuf = parse_value(program, &mut args, &flag)?;
                config.output.preview_png = Some(dir.join("preview.png"));
                config.output.svg_out = Some(dir.join("mountains.svg"));
                config.output.sheet_dir = Some(dir.join("sheets"));
                config.output.report_json = Some(dir.join("report.json"));
            }
            other => return Err(format!("Unknown flag {other}\n{}", usage(program))),
        }
    }

    Ok(config)
}

fn parse_value<T: std::str::FromStr>(
    program: &str,
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    let raw = args
        .next()
        .ok_or_else(|| format!("{flag} needs a value\n{}", usage(program)))?;
    raw.parse()
        .map_err(|_| format!("Invalid value {raw:?} for {flag}\n{}", usage(program)))
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <image|config.json> [--pixels-wide N] [--block-size N] \
         [--sharp-adjust N] [--outlines] [--out-dir DIR]"
    )
}
