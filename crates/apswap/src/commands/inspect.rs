//! `inspect` handler: show what the parsers extracted, without touching
//! any spreadsheet.

use serde::Serialize;
use tabled::Tabled;

use apswap_core::{
    CdpTable, IdentityTable, LookupTable, SectionStats, load_inventories, match_inventories,
};

use crate::cli::{GlobalOpts, InspectArgs, InspectSection};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::Renderer;

// ── Entries ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CdpEntry {
    ap_name: String,
    neighbor: String,
    port: String,
}

#[derive(Debug, Serialize)]
struct IdentityEntry {
    ap_name: String,
    mac: String,
    serial: String,
    meraki_serial: String,
}

#[derive(Debug, Serialize)]
struct LookupEntry {
    neighbor: String,
    port: String,
    mac: String,
    serial: String,
    meraki_serial: String,
}

fn cdp_entries(table: &CdpTable) -> Vec<CdpEntry> {
    table
        .iter()
        .map(|(ap, r)| CdpEntry {
            ap_name: ap.clone(),
            neighbor: r.neighbor.clone(),
            port: r.port.clone(),
        })
        .collect()
}

fn identity_entries(table: &IdentityTable) -> Vec<IdentityEntry> {
    table
        .iter()
        .map(|(ap, r)| IdentityEntry {
            ap_name: ap.clone(),
            mac: r.mac.to_string(),
            serial: r.serial.clone(),
            meraki_serial: r.meraki_serial.clone(),
        })
        .collect()
}

fn lookup_entries(table: &LookupTable) -> Vec<LookupEntry> {
    table
        .iter()
        .map(|(key, r)| LookupEntry {
            neighbor: key.neighbor.clone(),
            port: key.port.clone(),
            mac: r.mac.to_string(),
            serial: r.serial.clone(),
            meraki_serial: r.meraki_serial.clone(),
        })
        .collect()
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CdpRow {
    #[tabled(rename = "AP Name")]
    ap_name: String,
    #[tabled(rename = "Neighbor")]
    neighbor: String,
    #[tabled(rename = "Port")]
    port: String,
}

impl CdpRow {
    fn new(e: &CdpEntry) -> Self {
        Self {
            ap_name: e.ap_name.clone(),
            neighbor: e.neighbor.clone(),
            port: e.port.clone(),
        }
    }
}

#[derive(Tabled)]
struct IdentityRow {
    #[tabled(rename = "AP Name")]
    ap_name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Meraki Serial")]
    meraki_serial: String,
}

impl IdentityRow {
    fn new(e: &IdentityEntry) -> Self {
        Self {
            ap_name: e.ap_name.clone(),
            mac: e.mac.clone(),
            serial: e.serial.clone(),
            meraki_serial: e.meraki_serial.clone(),
        }
    }
}

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "Neighbor")]
    neighbor: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Meraki Serial")]
    meraki_serial: String,
}

impl LookupRow {
    fn new(e: &LookupEntry) -> Self {
        Self {
            neighbor: e.neighbor.clone(),
            port: e.port.clone(),
            mac: e.mac.clone(),
            serial: e.serial.clone(),
            meraki_serial: e.meraki_serial.clone(),
        }
    }
}

// ── Combined view ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct InspectReport {
    sections: Option<SectionStats>,
    cdp: Vec<CdpEntry>,
    identity: Vec<IdentityEntry>,
    lookup: Vec<LookupEntry>,
}

fn detail(report: &InspectReport, out: &Renderer) -> String {
    let mut blocks = Vec::new();
    if let Some(stats) = report.sections {
        blocks.push(format!(
            "{}\nap_summary: {}  cdp_neighbors: {}  identity_monitoring: {}",
            out.heading("Sections (lines)"),
            stats.ap_summary,
            stats.cdp_neighbors,
            stats.identity_monitoring
        ));
    }
    blocks.push(out.titled_table(
        &format!("CDP neighbors ({} APs)", report.cdp.len()),
        &report.cdp.iter().map(CdpRow::new).collect::<Vec<_>>(),
    ));
    blocks.push(out.titled_table(
        &format!("Meraki monitoring ({} APs)", report.identity.len()),
        &report.identity.iter().map(IdentityRow::new).collect::<Vec<_>>(),
    ));
    blocks.push(out.titled_table(
        &format!("Port mapping ({} entries)", report.lookup.len()),
        &report.lookup.iter().map(LookupRow::new).collect::<Vec<_>>(),
    ));
    blocks.join("\n\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &InspectArgs, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let out = config::renderer(global, cfg)?;

    let source = config::capture_source(&args.captures);
    let inventories = load_inventories(&source, &cfg.defaults.load_options(args.skip_lines))?;
    let lookup = match_inventories(&inventories.cdp, &inventories.identity);

    let text = match args.section {
        InspectSection::Cdp => out.list(
            &cdp_entries(&inventories.cdp),
            CdpRow::new,
            |e| e.ap_name.clone(),
        ),
        InspectSection::Identity => out.list(
            &identity_entries(&inventories.identity),
            IdentityRow::new,
            |e| format!("{} {}", e.ap_name, e.mac),
        ),
        InspectSection::Lookup => out.list(
            &lookup_entries(&lookup),
            LookupRow::new,
            |e| format!("{} {} {}", e.neighbor, e.port, e.mac),
        ),
        InspectSection::All => {
            let report = InspectReport {
                sections: inventories.sections,
                cdp: cdp_entries(&inventories.cdp),
                identity: identity_entries(&inventories.identity),
                lookup: lookup_entries(&lookup),
            };
            out.single(
                &report,
                |r| detail(r, &out),
                |r| {
                    r.cdp
                        .iter()
                        .map(|e| e.ap_name.clone())
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )
        }
    };

    out.emit(&text);
    Ok(())
}
