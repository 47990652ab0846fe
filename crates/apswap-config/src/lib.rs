//! Shared configuration for apswap.
//!
//! TOML file + environment layering via figment, and translation to the
//! core crate's `LoadOptions`. The CLI layers its own flags on top.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use apswap_core::{DEFAULT_IDENTITY_PREFIXES, LoadOptions};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value parsed but is unusable.
    #[error("{field} is invalid: {reason}")]
    Validation { field: String, reason: String },

    #[error("could not encode config as TOML: {0}")]
    Serialization(#[from] toml::ser::Error),

    /// Bad TOML, wrong types, or an unparsable `APSWAP_*` variable.
    #[error("could not load config: {0}")]
    Figment(Box<figment::Error>),

    #[error("config file I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Contents of `config.toml`. Every field is optional on disk.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Inserted before the extension of the tracking CSV to name the output.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Data rows scanned for the matched-AP preview.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Leading lines dropped from per-command capture files.
    #[serde(default)]
    pub skip_lines: usize,

    /// AP name prefixes accepted in Meraki monitoring output.
    #[serde(default = "default_identity_prefixes")]
    pub identity_prefixes: Vec<String>,

    /// Directory for `debug.log` and the tracing log.
    pub log_dir: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            output_suffix: default_output_suffix(),
            preview_limit: default_preview_limit(),
            skip_lines: 0,
            identity_prefixes: default_identity_prefixes(),
            log_dir: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_output_suffix() -> String {
    "_updated".into()
}
fn default_preview_limit() -> usize {
    19
}
fn default_identity_prefixes() -> Vec<String> {
    DEFAULT_IDENTITY_PREFIXES
        .iter()
        .map(|p| (*p).to_owned())
        .collect()
}

impl Defaults {
    /// Reject values that would make every run silently match nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity_prefixes.iter().all(String::is_empty) {
            return Err(ConfigError::Validation {
                field: "identity_prefixes".into(),
                reason: "at least one non-empty prefix is required".into(),
            });
        }
        if self.output_suffix.is_empty() {
            return Err(ConfigError::Validation {
                field: "output_suffix".into(),
                reason: "an empty suffix would overwrite the input CSV".into(),
            });
        }
        Ok(())
    }

    /// Core loading options, with an optional `skip_lines` override.
    pub fn load_options(&self, skip_lines: Option<usize>) -> LoadOptions {
        LoadOptions {
            skip_lines: skip_lines.unwrap_or(self.skip_lines),
            identity_prefixes: self
                .identity_prefixes
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
        }
    }
}

// ── Location ────────────────────────────────────────────────────────

const FILE_NAME: &str = "config.toml";

/// Env prefix; nested keys use `__`, e.g. `APSWAP_DEFAULTS__SKIP_LINES`.
const ENV_PREFIX: &str = "APSWAP_";

/// Platform config directory joined with `config.toml`, or
/// `$HOME/.config/apswap/config.toml` when no home directory can be
/// resolved through the platform APIs.
pub fn config_path() -> PathBuf {
    match ProjectDirs::from("com", "apswap", "apswap") {
        Some(dirs) => dirs.config_dir().join(FILE_NAME),
        None => std::env::var_os("HOME")
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
            .join(".config")
            .join("apswap")
            .join(FILE_NAME),
    }
}

// ── Load / save ─────────────────────────────────────────────────────

/// Built-in defaults, overlaid by the TOML file, overlaid by env.
fn figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Resolve and validate the effective configuration.
pub fn load_config() -> Result<Config, ConfigError> {
    let config: Config = figment().extract()?;
    config.defaults.validate()?;
    Ok(config)
}

/// [`load_config`], falling back to built-in defaults on any error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write `cfg` to [`config_path`], creating parent directories.
/// Returns the path written.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, toml::to_string_pretty(cfg)?)?;
    Ok(path)
}
