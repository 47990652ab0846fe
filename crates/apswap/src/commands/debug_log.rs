//! `debug.log`: a full dump of one run's intermediate structures.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use apswap_core::{Inventories, InventorySource, LookupTable};

use crate::error::CliError;

pub const FILE_NAME: &str = "debug.log";

/// Everything a run knows, borrowed for rendering.
pub struct DebugLog<'a> {
    pub input_csv: &'a Path,
    pub source: &'a InventorySource,
    pub output_csv: &'a Path,
    pub inventories: &'a Inventories,
    pub lookup: &'a LookupTable,
    pub matched: usize,
}

/// Write `debug.log` into `dir`, returning its path.
pub fn write(dir: &Path, log: &DebugLog<'_>) -> Result<PathBuf, CliError> {
    let path = dir.join(FILE_NAME);
    std::fs::write(&path, render(log)).map_err(|source| CliError::FileAccess {
        action: "write",
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}

fn display_opt(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".into(), |p| p.display().to_string())
}

pub fn render(log: &DebugLog<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== AP Matching Debug Log ===");
    let _ = writeln!(out, "Generated: {}", chrono::Local::now().to_rfc3339());
    let _ = writeln!(out);

    let (combined, cdp, meraki) = match log.source {
        InventorySource::Combined(path) => (Some(path.as_path()), None, None),
        InventorySource::Separate { cdp, identity } => {
            (None, cdp.as_deref(), identity.as_deref())
        }
    };
    let _ = writeln!(out, "Input files:");
    let _ = writeln!(out, "  CSV: {}", log.input_csv.display());
    let _ = writeln!(out, "  Combined: {}", display_opt(combined));
    let _ = writeln!(out, "  CDP: {}", display_opt(cdp));
    let _ = writeln!(out, "  Meraki: {}", display_opt(meraki));
    let _ = writeln!(out);
    let _ = writeln!(out, "Output file: {}", log.output_csv.display());

    if let Some(stats) = log.inventories.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sections (lines):");
        let _ = writeln!(out, "  ap_summary: {}", stats.ap_summary);
        let _ = writeln!(out, "  cdp_neighbors: {}", stats.cdp_neighbors);
        let _ = writeln!(out, "  identity_monitoring: {}", stats.identity_monitoring);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "CDP data ({} APs):", log.inventories.cdp.len());
    for (ap, r) in &log.inventories.cdp {
        let _ = writeln!(out, "  {ap}: neighbor={} port={}", r.neighbor, r.port);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Meraki data ({} APs):", log.inventories.identity.len());
    for (ap, r) in &log.inventories.identity {
        let _ = writeln!(
            out,
            "  {ap}: mac={} serial={} meraki_serial={}",
            r.mac, r.serial, r.meraki_serial
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Port mapping ({} entries):", log.lookup.len());
    for (key, r) in log.lookup {
        let _ = writeln!(
            out,
            "  {key}: mac={} serial={} meraki_serial={}",
            r.mac, r.serial, r.meraki_serial
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Matched {} APs", log.matched);
    out
}
