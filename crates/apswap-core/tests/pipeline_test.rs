//! End-to-end tests for the capture -> lookup -> tracking sheet pipeline.
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use apswap_core::{
    CoreError, IdentityRecord, InventorySource, JoinKey, LoadOptions, MacAddress, TrackingSheet,
    count_matched, load_inventories, match_inventories, parse_cdp, parse_identity_default,
    project, read_sheet, segment_text, write_sheet,
};

// ── Fixtures ────────────────────────────────────────────────────────

const SHOWS: &str = "\
WLC-CORE-01#sh ap sum
Number of APs: 3

AP Name   Slots  AP Model   Ethernet MAC    Radio MAC       Location  Country  IP Address   State
--------  -----  ---------  --------------  --------------  --------  -------  -----------  ----------
AP01      2      C9130AXI   6cef.abcd.1234  0c75.bd11.2200  default   US       10.10.1.21   Registered
AP02      2      C9130AXI   6cef.abcd.5678  0c75.bd11.2300  default   US       10.10.1.22   Registered

WLC-CORE-01#sho ap cdp n
Number of neighbors: 3

AP Name   AP IP        Neighbor Name          Neighbor IP   Neighbor Port
--------  -----------  ---------------------  ------------  -------------
AP01      10.10.1.21   sw-idf1.corp.example   10.10.1.2     Gi1/0/1
AP02      10.10.1.22   sw-idf1.corp.example   10.10.1.2     Gi1/0/2
AP03      10.10.1.23   sw-idf2                10.10.1.3     Gi1/0/7

WLC-CORE-01#show ap meraki monitoring summary
Meraki Monitoring Summary

AP Name   AP Model   Radio MAC       MAC Address     Serial Number  Cloud ID        Status
--------  ---------  --------------  --------------  -------------  --------------  ----------
AP01      C9130AXI   0c75.bd11.2200  6cef.abcd.1234  FOC2601X0AB    Q5AB-CDEF-GHIJ  Registered
AP02      C9130AXI   0c75.bd11.2300  6cef.abcd.5678  FOC2601X0CD    Q5AB-KLMN-OPQR  Registered

Number of Supported APs: 2

WLC-CORE-01#show clock
*12:01:02.123 UTC Mon Oct 19 2026
";

const TRACKING: &str = "\
AP Name,MAC Address,Serial Number,Meraki Serial,Model,Floor,Notes,CDP Neighbor,CDP Port
OLD-AP-1,,,,AIR-AP2802I,1,\"lobby, north\",sw-idf1,Gi1/0/1
OLD-AP-2,,,,AIR-AP2802I,1,,sw-idf1.corp.example,Gi1/0/2
OLD-AP-3,,,,AIR-AP2802I,2,,sw-idf2,Gi1/0/7
,,,,,,,sw-idf1,Gi1/0/1
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ── Segmentation + parsing ──────────────────────────────────────────

#[test]
fn cdp_section_reparses_identically() {
    let sections = segment_text(SHOWS);

    let in_place = parse_cdp(&sections.cdp_neighbors);
    let isolated: String = sections
        .cdp_neighbors
        .iter()
        .map(|l| format!("{l}\n"))
        .collect();
    let resegmented = parse_cdp(isolated.lines());

    assert_eq!(in_place, resegmented);
    assert_eq!(in_place.len(), 3);
}

#[test]
fn combined_capture_parses_both_inventories() {
    let sections = segment_text(SHOWS);
    let cdp = parse_cdp(&sections.cdp_neighbors);
    let identity = parse_identity_default(&sections.identity_monitoring);

    assert_eq!(cdp["AP03"].neighbor, "sw-idf2");
    assert_eq!(identity.len(), 2);
    assert_eq!(identity["AP02"].mac.as_str(), "6C:EF:AB:CD:56:78");
    // The clock output after `show clock` belongs to no section.
    assert!(!sections.identity_monitoring.iter().any(|l| l.contains("UTC")));
}

#[test]
fn worked_example() {
    let cdp = parse_cdp(["AP01   1   switch-a.domain.com   1   Gi1/0/1"]);
    let identity =
        parse_identity_default(["AP01 C9130AXI 0c75.bd11.2200 6cef.abcd.1234 SN123 MX-CLOUD-1 ok"]);
    let lookup = match_inventories(&cdp, &identity);

    let payload = IdentityRecord {
        mac: MacAddress::canonicalize("6cef.abcd.1234"),
        serial: "SN123".into(),
        meraki_serial: "MX-CLOUD-1".into(),
    };
    assert_eq!(lookup[&JoinKey::new("switch-a.domain.com", "Gi1/0/1")], payload);
    assert_eq!(lookup[&JoinKey::new("switch-a", "Gi1/0/1")], payload);

    let to_row = |s: &str| s.split(',').map(str::to_owned).collect::<Vec<_>>();
    let mut sheet = TrackingSheet {
        header: to_row("AP Name,MAC,Serial,Meraki Serial,a,b,c,Neighbor,Port"),
        rows: vec![to_row("AP02,,,,,,,switch-a,Gi1/0/1")],
        bom: false,
    };
    project(&lookup, &mut sheet);

    assert_eq!(
        sheet.rows[0],
        to_row("AP02,6C:EF:AB:CD:12:34,SN123,MX-CLOUD-1,,,,switch-a,Gi1/0/1")
    );
}

// ── Full pipeline over files ────────────────────────────────────────

#[test]
fn combined_file_to_updated_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let shows = write(dir.path(), "shows.txt", SHOWS);
    let input = write(dir.path(), "tracking.csv", TRACKING);
    let output = dir.path().join("tracking_updated.csv");

    let inventories =
        load_inventories(&InventorySource::Combined(shows), &LoadOptions::default()).unwrap();
    assert_eq!(inventories.sections.unwrap().cdp_neighbors, 8);

    let lookup = match_inventories(&inventories.cdp, &inventories.identity);
    let mut sheet = read_sheet(&input).unwrap();
    let original = sheet.clone();
    let projection = project(&lookup, &mut sheet);
    write_sheet(&output, &sheet).unwrap();

    // AP03 has no identity record, the nameless row is never matched.
    assert_eq!(projection.updated, 2);
    assert_eq!(projection.matched, 2);

    let reread = read_sheet(&output).unwrap();
    assert_eq!(reread, sheet);
    assert_eq!(reread.header, original.header);
    assert_eq!(reread.rows.len(), original.rows.len());
    assert_eq!(reread.rows[0][1], "6C:EF:AB:CD:12:34");
    assert_eq!(reread.rows[0][6], "lobby, north");
    assert_eq!(reread.rows[1][3], "Q5AB-KLMN-OPQR");
    assert_eq!(reread.rows[2], original.rows[2]);
    assert_eq!(reread.rows[3], original.rows[3]);
    assert_eq!(count_matched(&reread), 2);
}

#[test]
fn exported_sheet_keeps_bom_and_blank_rows() {
    let dir = tempfile::tempdir().unwrap();
    let shows = write(dir.path(), "shows.txt", SHOWS);
    let input = write(
        dir.path(),
        "tracking.csv",
        "\u{feff}AP Name,MAC,Serial,Meraki Serial,Model,Floor,Notes,Neighbor,Port\n\
         OLD-AP-1,,,,m,1,,sw-idf1,Gi1/0/1\n\
         \n\
         OLD-AP-2,,,,m,1,,sw-idf1,Gi1/0/2\n",
    );
    let output = dir.path().join("out.csv");

    let inventories =
        load_inventories(&InventorySource::Combined(shows), &LoadOptions::default()).unwrap();
    let lookup = match_inventories(&inventories.cdp, &inventories.identity);
    let mut sheet = read_sheet(&input).unwrap();
    let projection = project(&lookup, &mut sheet);
    write_sheet(&output, &sheet).unwrap();

    assert_eq!(projection.updated, 2);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "\u{feff}AP Name,MAC,Serial,Meraki Serial,Model,Floor,Notes,Neighbor,Port\n\
         OLD-AP-1,6C:EF:AB:CD:12:34,FOC2601X0AB,Q5AB-CDEF-GHIJ,m,1,,sw-idf1,Gi1/0/1\n\
         \n\
         OLD-AP-2,6C:EF:AB:CD:56:78,FOC2601X0CD,Q5AB-KLMN-OPQR,m,1,,sw-idf1,Gi1/0/2\n"
    );
}

#[test]
fn separate_files_with_skipped_preamble() {
    let dir = tempfile::tempdir().unwrap();
    let cdp = write(
        dir.path(),
        "cdp.txt",
        "WLC#show ap cdp neighbors\nAP01 10.0.0.1 sw1.corp 10.0.0.2 Gi1/0/1\n",
    );
    let identity = write(
        dir.path(),
        "meraki.txt",
        "WLC#show ap meraki monitoring summary\nAP01 m r 6cef.abcd.1234 SN1 CL1 ok\n",
    );

    let options = LoadOptions {
        skip_lines: 1,
        ..LoadOptions::default()
    };
    let source = InventorySource::Separate {
        cdp: Some(cdp),
        identity: Some(identity),
    };
    let inventories = load_inventories(&source, &options).unwrap();

    assert!(inventories.sections.is_none());
    assert_eq!(inventories.cdp["AP01"].port, "Gi1/0/1");
    assert_eq!(inventories.identity["AP01"].serial, "SN1");
}

#[test]
fn missing_capture_fails_before_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let cdp = write(dir.path(), "cdp.txt", "AP01 10.0.0.1 sw1 10.0.0.2 Gi1/0/1\n");

    let source = InventorySource::Separate {
        cdp: Some(cdp),
        identity: Some(dir.path().join("missing.txt")),
    };
    let err = load_inventories(&source, &LoadOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::MissingInput { role: "Meraki", .. }));
    assert!(err.path().ends_with("missing.txt"));
}

#[test]
fn missing_combined_capture_is_fatal() {
    let source = InventorySource::Combined("/nonexistent/apswap/shows.txt".into());
    let err = load_inventories(&source, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, CoreError::MissingInput { .. }));
}
