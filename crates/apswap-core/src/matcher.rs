//! Location matching and projection onto the tracking sheet.
//!
//! A replacement AP is cabled to the same switch port as the AP it
//! replaced. Joining CDP (where) with identity (what) yields a switch-port
//! lookup, which is then queried with the neighbor/port recorded on each
//! tracking row.
//!
//! The two show commands disagree about hostname qualification, so every
//! matched AP is indexed under both its full and its short neighbor name.
//! Key collisions are resolved last-write-wins with no conflict report.

use serde::Serialize;
use tracing::{debug, info};

use crate::model::{CdpTable, IdentityTable, JoinKey, LookupTable};
use crate::tracking::{self, TrackingSheet};

/// Leading label of a possibly fully-qualified hostname.
pub fn short_name(neighbor: &str) -> &str {
    neighbor.split_once('.').map_or(neighbor, |(short, _)| short)
}

/// Neighbor-name variants an AP is indexed under: full first, then short.
fn name_variants(neighbor: &str) -> [&str; 2] {
    [neighbor, short_name(neighbor)]
}

/// Join CDP and identity tables into a switch-port lookup.
///
/// Walks the CDP table in order. An AP missing from the identity table
/// contributes nothing.
pub fn build_lookup(cdp: &CdpTable, identity: &IdentityTable) -> LookupTable {
    let mut lookup = LookupTable::new();

    for (ap_name, location) in cdp {
        let Some(record) = identity.get(ap_name) else {
            debug!(ap = %ap_name, "no identity record, skipping");
            continue;
        };

        for variant in name_variants(&location.neighbor) {
            let key = JoinKey::new(variant, location.port.as_str());
            if let Some(displaced) = lookup.insert(key, record.clone()) {
                if displaced != *record {
                    debug!(
                        ap = %ap_name,
                        neighbor = variant,
                        port = %location.port,
                        "switch port already claimed, overwriting"
                    );
                }
            }
        }
    }

    info!(entries = lookup.len(), "built switch-port lookup");
    lookup
}

/// Entry point pairing the two parsed inventories.
pub fn match_inventories(cdp: &CdpTable, identity: &IdentityTable) -> LookupTable {
    build_lookup(cdp, identity)
}

// ── Projection ───────────────────────────────────────────────────────

/// Outcome of projecting a lookup onto a tracking sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Rows whose identity fields were written during this projection.
    pub updated: usize,
    /// Post-hoc count of rows that carry a MAC (see [`count_matched`]).
    pub matched: usize,
}

/// Fill MAC/serial/cloud serial on every tracking row whose recorded
/// neighbor and port appear in `lookup`.
///
/// The header, row count, row order and row lengths are preserved; only
/// fields 1–3 of a matching row are written. Rows that are too short or
/// have no AP name are left untouched.
pub fn project(lookup: &LookupTable, sheet: &mut TrackingSheet) -> Projection {
    let mut updated = 0;

    for (index, row) in sheet.rows.iter_mut().enumerate() {
        let Some(key) = tracking::join_key(row) else {
            continue;
        };
        let Some(record) = lookup.get(&key) else {
            debug!(row = index + 1, %key, "no replacement AP at this port");
            continue;
        };

        row[tracking::MAC] = record.mac.to_string();
        row[tracking::SERIAL] = record.serial.clone();
        row[tracking::MERAKI_SERIAL] = record.meraki_serial.clone();
        updated += 1;
        debug!(row = index + 1, ap = %row[tracking::AP_NAME], %key, "filled identity");
    }

    let matched = count_matched(sheet);
    info!(updated, matched, "projected lookup onto tracking sheet");
    Projection { updated, matched }
}

/// Count data rows that have an AP name and a MAC.
///
/// This re-scans the sheet rather than counting writes, so rows whose MAC
/// was already filled before projection are counted as matched too.
pub fn count_matched(sheet: &TrackingSheet) -> usize {
    sheet.rows.iter().filter(|row| tracking::is_matched(row)).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{CdpRecord, IdentityRecord, MacAddress};
    use crate::parse::{parse_cdp, parse_identity_default};
    use pretty_assertions::assert_eq;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_owned()).collect()
    }

    fn identity(mac: &str, serial: &str, cloud: &str) -> IdentityRecord {
        IdentityRecord {
            mac: MacAddress::canonicalize(mac),
            serial: serial.into(),
            meraki_serial: cloud.into(),
        }
    }

    fn header() -> Vec<String> {
        row(&[
            "AP Name", "MAC", "Serial", "Meraki Serial", "Model", "Floor", "Notes", "Neighbor",
            "Port",
        ])
    }

    #[test]
    fn short_name_takes_leading_label() {
        assert_eq!(short_name("switch-a.domain.com"), "switch-a");
        assert_eq!(short_name("switch-a"), "switch-a");
        assert_eq!(short_name(".leading"), "");
    }

    #[test]
    fn matched_ap_yields_full_and_short_keys() {
        let cdp = parse_cdp(["AP01   1   switch-a.domain.com   1   Gi1/0/1"]);
        let ids = parse_identity_default(["AP01 C9130 x 6cef.abcd.1234 SN123 MX-CLOUD-1 ok"]);

        let lookup = match_inventories(&cdp, &ids);

        let expected = identity("6cef.abcd.1234", "SN123", "MX-CLOUD-1");
        assert_eq!(lookup.len(), 2);
        assert_eq!(
            lookup[&JoinKey::new("switch-a.domain.com", "Gi1/0/1")],
            expected
        );
        assert_eq!(lookup[&JoinKey::new("switch-a", "Gi1/0/1")], expected);
    }

    #[test]
    fn unqualified_neighbor_yields_single_key() {
        let mut cdp = CdpTable::new();
        cdp.insert(
            "AP01".into(),
            CdpRecord {
                neighbor: "sw1".into(),
                port: "Gi1/0/1".into(),
            },
        );
        let mut ids = IdentityTable::new();
        ids.insert("AP01".into(), identity("6cef.abcd.1234", "SN1", "CL1"));

        assert_eq!(build_lookup(&cdp, &ids).len(), 1);
    }

    #[test]
    fn ap_without_identity_is_dropped() {
        let cdp = parse_cdp(["AP09 10.0.0.9 sw1 10.0.0.2 Gi1/0/9"]);
        let ids = IdentityTable::new();
        assert!(build_lookup(&cdp, &ids).is_empty());
    }

    #[test]
    fn later_ap_overwrites_colliding_port() {
        let cdp = parse_cdp([
            "AP01 10.0.0.1 sw1.corp 10.0.0.2 Gi1/0/1",
            "AP02 10.0.0.3 sw1 10.0.0.2 Gi1/0/1",
        ]);
        let ids = parse_identity_default([
            "AP01 m r 6cef.abcd.0001 SN1 CL1 ok",
            "AP02 m r 6cef.abcd.0002 SN2 CL2 ok",
        ]);
        let lookup = build_lookup(&cdp, &ids);

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup[&JoinKey::new("sw1.corp", "Gi1/0/1")].serial, "SN1");
        assert_eq!(lookup[&JoinKey::new("sw1", "Gi1/0/1")].serial, "SN2");
    }

    #[test]
    fn projects_onto_matching_rows_only() {
        let mut lookup = LookupTable::new();
        lookup.insert(
            JoinKey::new("switch-a", "Gi1/0/1"),
            identity("6cef.abcd.1234", "SN123", "MX-CLOUD-1"),
        );

        let mut sheet = TrackingSheet {
            header: header(),
            rows: vec![
                row(&["AP02", "", "", "", "", "", "", "switch-a", "Gi1/0/1"]),
                row(&["AP03", "", "", "", "", "", "", "switch-a", "Gi1/0/2"]),
                row(&["", "", "", "", "", "", "", "switch-a", "Gi1/0/1"]),
                row(&["AP04", "", "", "", "", "", "switch-a"]),
            ],
            bom: false,
        };
        let before = sheet.clone();

        let projection = project(&lookup, &mut sheet);

        assert_eq!(
            sheet.rows[0],
            row(&[
                "AP02",
                "6C:EF:AB:CD:12:34",
                "SN123",
                "MX-CLOUD-1",
                "",
                "",
                "",
                "switch-a",
                "Gi1/0/1"
            ])
        );
        assert_eq!(sheet.header, before.header);
        assert_eq!(&sheet.rows[1..], &before.rows[1..]);
        assert_eq!(
            projection,
            Projection {
                updated: 1,
                matched: 1
            }
        );
    }

    #[test]
    fn header_is_never_matched() {
        let mut lookup = LookupTable::new();
        lookup.insert(JoinKey::new("Neighbor", "Port"), identity("aaaa.bbbb.cccc", "S", "C"));

        let mut sheet = TrackingSheet {
            header: header(),
            rows: Vec::new(),
            bom: false,
        };
        project(&lookup, &mut sheet);
        assert_eq!(sheet.header, header());
    }

    #[test]
    fn extra_columns_pass_through() {
        let mut lookup = LookupTable::new();
        lookup.insert(JoinKey::new("sw1", "Gi1/0/1"), identity("aaaa.bbbb.cccc", "S", "C"));

        let mut sheet = TrackingSheet {
            header: header(),
            rows: vec![row(&[
                "AP01", "old", "old", "old", "m", "f", "n", "sw1", "Gi1/0/1", "extra",
            ])],
            bom: false,
        };
        project(&lookup, &mut sheet);
        assert_eq!(sheet.rows[0].len(), 10);
        assert_eq!(sheet.rows[0][1], "AA:AA:BB:BB:CC:CC");
        assert_eq!(sheet.rows[0][9], "extra");
    }

    #[test]
    fn prefilled_mac_counts_as_matched() {
        let mut sheet = TrackingSheet {
            header: header(),
            rows: vec![
                row(&["AP01", "AA:BB:CC:DD:EE:FF", "S", "C", "", "", "", "sw9", "Gi9/0/9"]),
                row(&["AP02", "", "", "", "", "", "", "sw9", "Gi9/0/8"]),
            ],
            bom: false,
        };
        let projection = project(&LookupTable::new(), &mut sheet);
        assert_eq!(projection.updated, 0);
        assert_eq!(projection.matched, 1);
        assert_eq!(count_matched(&sheet), 1);
    }
}
