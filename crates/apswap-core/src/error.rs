// ── Core error types ──
//
// Only I/O-level failures surface as errors. Data-shape irregularities
// (short lines, table headers, unmatched APs, odd MAC tokens) are skipped
// where they occur and never reach this type.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("{role} file not found: {}", path.display())]
    MissingInput { role: &'static str, path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tracking sheet {} has no header row", path.display())]
    EmptySheet { path: PathBuf },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── CSV errors (both directions) ─────────────────────────────────
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CoreError {
    /// The file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::MissingInput { path, .. }
            | Self::Read { path, .. }
            | Self::EmptySheet { path }
            | Self::Write { path, .. }
            | Self::Csv { path, .. } => path,
        }
    }
}
