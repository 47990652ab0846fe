//! Inventory loading from capture files.
//!
//! Captures arrive either as one combined transcript (all show commands
//! pasted together) or as one file per command. Every named file must
//! exist; a missing one fails the run before anything is parsed.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{CdpTable, IdentityTable};
use crate::parse::{DEFAULT_IDENTITY_PREFIXES, parse_cdp, parse_identity};
use crate::segment::{SectionStats, segment_text};

/// Where the CDP and identity captures come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    /// One transcript holding several show commands.
    Combined(PathBuf),
    /// One file per show command. Either may be absent.
    Separate {
        cdp: Option<PathBuf>,
        identity: Option<PathBuf>,
    },
}

/// Parsing knobs that aren't part of the capture itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Leading lines to drop from each per-command file.
    pub skip_lines: usize,
    /// Accepted AP name prefixes for identity rows.
    pub identity_prefixes: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_lines: 0,
            identity_prefixes: DEFAULT_IDENTITY_PREFIXES
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }
}

/// Both parsed inventories plus segmentation stats for combined captures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventories {
    pub sections: Option<SectionStats>,
    pub cdp: CdpTable,
    pub identity: IdentityTable,
}

/// Read and parse the captures named by `source`.
pub fn load_inventories(
    source: &InventorySource,
    options: &LoadOptions,
) -> Result<Inventories, CoreError> {
    let inventories = match source {
        InventorySource::Combined(path) => {
            info!(path = %path.display(), "parsing combined capture");
            let text = read_capture(path, "Combined capture")?;
            let sections = segment_text(&text);
            debug!(stats = ?sections.stats(), "segmented capture");
            Inventories {
                sections: Some(sections.stats()),
                cdp: parse_cdp(&sections.cdp_neighbors),
                identity: parse_identity(
                    &sections.identity_monitoring,
                    options.identity_prefixes.as_slice(),
                ),
            }
        }
        InventorySource::Separate { cdp, identity } => {
            // Both paths must exist before either is parsed.
            for (role, path) in [("CDP", cdp), ("Meraki", identity)] {
                if let Some(path) = path {
                    ensure_exists(path, role)?;
                }
            }

            let cdp = match cdp {
                Some(path) => {
                    info!(path = %path.display(), "reading CDP capture");
                    let text = read_capture(path, "CDP")?;
                    parse_cdp(text.lines().skip(options.skip_lines))
                }
                None => CdpTable::new(),
            };
            let identity = match identity {
                Some(path) => {
                    info!(path = %path.display(), "reading Meraki capture");
                    let text = read_capture(path, "Meraki")?;
                    parse_identity(
                        text.lines().skip(options.skip_lines),
                        options.identity_prefixes.as_slice(),
                    )
                }
                None => IdentityTable::new(),
            };
            Inventories {
                sections: None,
                cdp,
                identity,
            }
        }
    };

    info!(
        cdp = inventories.cdp.len(),
        identity = inventories.identity.len(),
        "loaded inventories"
    );
    Ok(inventories)
}

fn ensure_exists(path: &Path, role: &'static str) -> Result<(), CoreError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CoreError::MissingInput {
            role,
            path: path.to_path_buf(),
        })
    }
}

fn read_capture(path: &Path, role: &'static str) -> Result<String, CoreError> {
    ensure_exists(path, role)?;
    std::fs::read_to_string(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })
}
