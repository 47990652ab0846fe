//! CLI configuration: a thin wrapper around `apswap_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--output, --color, etc.).

use clap::ValueEnum;

use apswap_core::InventorySource;

use crate::cli::{CaptureArgs, ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::Renderer;

// ── Re-exports from shared crate ────────────────────────────────────

pub use apswap_config::{Config, config_path, load_config, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Output format: flag/env, then config, then table.
pub fn resolve_output(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    match global.output {
        Some(format) => Ok(format),
        None => parse_setting("defaults.output", &cfg.defaults.output),
    }
}

/// Color mode: flag, then config, then auto.
pub fn resolve_color(global: &GlobalOpts, cfg: &Config) -> Result<ColorMode, CliError> {
    match global.color {
        Some(mode) => Ok(mode),
        None => parse_setting("defaults.color", &cfg.defaults.color),
    }
}

/// Renderer for a command, with flags taking precedence over config.
pub fn renderer(global: &GlobalOpts, cfg: &Config) -> Result<Renderer, CliError> {
    Ok(Renderer::new(
        resolve_output(global, cfg)?,
        resolve_color(global, cfg)?,
        global.quiet,
    ))
}

fn parse_setting<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// Translate capture flags into a core `InventorySource`.
///
/// clap already enforces that `--combined` excludes the separate files
/// and that at least one capture is given.
pub fn capture_source(args: &CaptureArgs) -> InventorySource {
    match &args.combined {
        Some(path) => InventorySource::Combined(path.clone()),
        None => InventorySource::Separate {
            cdp: args.cdp.clone(),
            identity: args.meraki.clone(),
        },
    }
}
