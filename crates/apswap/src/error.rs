//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use apswap_config::ConfigError;
use apswap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Inputs ───────────────────────────────────────────────────────

    #[error("{role} file not found: {path}")]
    #[diagnostic(
        code(apswap::missing_input),
        help("Check the path and try again. No output file was written.")
    )]
    MissingInput { role: String, path: String },

    #[error("Tracking sheet {path} is empty")]
    #[diagnostic(
        code(apswap::empty_sheet),
        help("The first row of the tracking CSV must be a header row.")
    )]
    EmptySheet { path: String },

    #[error("Could not {action} {path}")]
    #[diagnostic(code(apswap::file_access))]
    FileAccess {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}")]
    #[diagnostic(
        code(apswap::csv),
        help("The tracking spreadsheet must be UTF-8 comma-separated values.")
    )]
    Csv {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(apswap::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(apswap::config_exists),
        help("Use --force to overwrite it, or edit it directly.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(apswap::config))]
    Config(Box<figment::Error>),

    #[error("Failed to serialize configuration: {0}")]
    #[diagnostic(code(apswap::serialization))]
    Serialization(#[from] toml::ser::Error),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::ConfigExists { .. } => exit_code::CONFLICT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let path = err.path().display().to_string();
        match err {
            CoreError::MissingInput { role, .. } => CliError::MissingInput {
                role: role.into(),
                path,
            },
            CoreError::EmptySheet { .. } => CliError::EmptySheet { path },
            CoreError::Read { source, .. } => CliError::FileAccess {
                action: "read",
                path,
                source,
            },
            CoreError::Write { source, .. } => CliError::FileAccess {
                action: "write",
                path,
                source,
            },
            CoreError::Csv { source, .. } => CliError::Csv {
                path,
                source: Box::new(source),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Serialization(e) => CliError::Serialization(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
