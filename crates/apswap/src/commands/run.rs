//! `run` handler: captures -> switch-port lookup -> updated tracking CSV.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use apswap_core::{
    default_output_path, load_inventories, match_inventories, project, read_sheet, tracking,
    write_sheet,
};

use crate::cli::{GlobalOpts, RunArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::Renderer;

use super::debug_log::{self, DebugLog};

// ── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Tabled, Serialize)]
struct MatchedRow {
    #[tabled(rename = "AP Name")]
    ap_name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Meraki Serial")]
    meraki_serial: String,
}

impl MatchedRow {
    fn from_row(row: &[String]) -> Self {
        Self {
            ap_name: row[tracking::AP_NAME].clone(),
            mac: row[tracking::MAC].clone(),
            serial: row[tracking::SERIAL].clone(),
            meraki_serial: row[tracking::MERAKI_SERIAL].clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    input: String,
    output: String,
    cdp_records: usize,
    identity_records: usize,
    lookup_entries: usize,
    updated: usize,
    matched: usize,
    preview: Vec<MatchedRow>,
    debug_log: Option<String>,
}

fn summary(report: &RunReport, out: &Renderer) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Loaded {} APs from CDP neighbors", report.cdp_records);
    let _ = writeln!(
        text,
        "Loaded {} APs from Meraki monitoring",
        report.identity_records
    );
    let _ = writeln!(text);
    let _ = writeln!(text, "{}", out.check(&format!("Generated {}", report.output)));
    let _ = write!(
        text,
        "{}",
        out.check(&format!(
            "Successfully matched {} APs to their locations",
            report.matched
        ))
    );

    if !report.preview.is_empty() {
        let _ = write!(
            text,
            "\n\n{}",
            out.titled_table("Matched APs:", &report.preview)
        );
    }
    if let Some(ref path) = report.debug_log {
        let _ = write!(text, "\n{}", out.check(&format!("Debug log saved to {path}")));
    }
    text
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: &RunArgs,
    log_dir: Option<&Path>,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let out = config::renderer(global, cfg)?;

    // Every input is read and parsed before the output file is created.
    let mut sheet = read_sheet(&args.input_csv)?;
    let source = config::capture_source(&args.captures);
    let inventories = load_inventories(&source, &cfg.defaults.load_options(args.skip_lines))?;

    let lookup = match_inventories(&inventories.cdp, &inventories.identity);
    let projection = project(&lookup, &mut sheet);

    let output_csv = args.output_csv.clone().unwrap_or_else(|| {
        default_output_path(&args.input_csv, &cfg.defaults.output_suffix)
    });
    write_sheet(&output_csv, &sheet)?;
    info!(path = %output_csv.display(), "generated updated tracking sheet");

    let preview_limit = args.preview.unwrap_or(cfg.defaults.preview_limit);
    let preview = sheet
        .rows
        .iter()
        .take(preview_limit)
        .filter(|row| tracking::is_matched(row))
        .map(|row| MatchedRow::from_row(row))
        .collect();

    let debug_log = match log_dir {
        Some(dir) => {
            let log = DebugLog {
                input_csv: &args.input_csv,
                source: &source,
                output_csv: &output_csv,
                inventories: &inventories,
                lookup: &lookup,
                matched: projection.matched,
            };
            let path = debug_log::write(dir, &log)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let report = RunReport {
        input: args.input_csv.display().to_string(),
        output: output_csv.display().to_string(),
        cdp_records: inventories.cdp.len(),
        identity_records: inventories.identity.len(),
        lookup_entries: lookup.len(),
        updated: projection.updated,
        matched: projection.matched,
        preview,
        debug_log,
    };

    out.emit(&out.single(&report, |r| summary(r, &out), |r| r.output.clone()));
    Ok(())
}
