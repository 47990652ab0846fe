// ── `show ap meraki monitoring summary` parser ──
//
// AP Name  AP Model   Radio MAC       MAC Address     Serial Number  Cloud ID        Status
// -------  ---------  --------------  --------------  -------------  --------------  --------
// AP01     C9130AXI   0c75.bd11.2200  6cef.abcd.1234  FOC2601X0AB    Q5AB-CDEF-GHIJ  Registered

use tracing::{debug, trace};

use super::contains_any;
use crate::model::{IdentityRecord, IdentityTable, MacAddress};

/// Header, separator and footer markers.
const SKIP_MARKERS: &[&str] = &["---", "AP Name", "Meraki Monitoring", "Number of Supported"];

const MIN_FIELDS: usize = 7;

/// AP naming conventions accepted when no override is configured.
pub const DEFAULT_IDENTITY_PREFIXES: &[&str] = &["AP", "canary"];

/// Parse Meraki monitoring rows into AP name -> identity.
///
/// Only rows whose first field starts with one of `prefixes` are data.
/// Field 3 is the MAC (canonicalized), field 4 the serial and field 5 the
/// cloud serial. A later row for the same AP replaces the earlier one.
pub fn parse_identity<I, S, P>(lines: I, prefixes: &[P]) -> IdentityTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: AsRef<str>,
{
    let mut table = IdentityTable::new();

    for line in lines {
        let line = line.as_ref();
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS || contains_any(line, SKIP_MARKERS) {
            trace!(line, "skipping non-data identity line");
            continue;
        }

        let ap_name = fields[0];
        if !prefixes.iter().any(|p| ap_name.starts_with(p.as_ref())) {
            trace!(ap = ap_name, "name does not follow AP naming convention");
            continue;
        }

        let record = IdentityRecord {
            mac: MacAddress::canonicalize(fields[3]),
            serial: fields[4].to_owned(),
            meraki_serial: fields[5].to_owned(),
        };
        if let Some(previous) = table.insert(ap_name.to_owned(), record) {
            debug!(ap = ap_name, ?previous, "duplicate identity row, keeping the later one");
        }
    }

    table
}

/// [`parse_identity`] with [`DEFAULT_IDENTITY_PREFIXES`].
pub fn parse_identity_default<I, S>(lines: I) -> IdentityTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_identity(lines, DEFAULT_IDENTITY_PREFIXES)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
Meraki Monitoring Summary

AP Name  AP Model   Radio MAC       MAC Address     Serial Number  Cloud ID        Status
-------  ---------  --------------  --------------  -------------  --------------  ----------
AP01     C9130AXI   0c75.bd11.2200  6cef.abcd.1234  FOC2601X0AB    Q5AB-CDEF-GHIJ  Registered
canary7  C9136I     0c75.bd11.2300  6cef.abcd.5678  FOC2601X0CD    Q5AB-KLMN-OPQR  Registered
WLC-01   C9800      0c75.bd11.2400  6cef.abcd.9999  FOC2601X0EF    Q5AB-STUV-WXYZ  Registered

Number of Supported APs: 2
";

    #[test]
    fn parses_data_rows() {
        let table = parse_identity_default(SAMPLE.lines());
        assert_eq!(table.len(), 2);
        assert_eq!(
            table["AP01"],
            IdentityRecord {
                mac: MacAddress::canonicalize("6cef.abcd.1234"),
                serial: "FOC2601X0AB".into(),
                meraki_serial: "Q5AB-CDEF-GHIJ".into(),
            }
        );
        assert_eq!(table["canary7"].mac.as_str(), "6C:EF:AB:CD:56:78");
    }

    #[test]
    fn rejects_names_outside_convention() {
        let table = parse_identity_default(SAMPLE.lines());
        assert!(!table.contains_key("WLC-01"));
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let lines = ["ap01 m r 6cef.abcd.1234 SN1 CL1 ok"];
        assert!(parse_identity_default(lines).is_empty());
    }

    #[test]
    fn custom_prefixes() {
        let lines = [
            "WAP-1 m r 6cef.abcd.1234 SN1 CL1 ok",
            "AP02 m r 6cef.abcd.5678 SN2 CL2 ok",
        ];
        let table = parse_identity(lines, &["WAP-"]);
        assert_eq!(table.keys().collect::<Vec<_>>(), ["WAP-1"]);
    }

    #[test]
    fn skips_short_lines() {
        let lines = ["AP01 m r 6cef.abcd.1234 SN1 CL1"];
        assert!(parse_identity_default(lines).is_empty());
    }

    #[test]
    fn malformed_mac_passes_through() {
        let lines = ["AP01 m r not-a-mac SN1 CL1 ok"];
        let table = parse_identity_default(lines);
        assert_eq!(table["AP01"].mac.as_str(), "NO:TA:MA:C");
    }

    #[test]
    fn later_row_wins() {
        let lines = [
            "AP01 m r 6cef.abcd.1234 SN1 CL1 ok",
            "AP01 m r 6cef.abcd.ffff SN9 CL9 ok",
        ];
        let table = parse_identity_default(lines);
        assert_eq!(table.len(), 1);
        assert_eq!(table["AP01"].serial, "SN9");
        assert_eq!(table["AP01"].mac.as_str(), "6C:EF:AB:CD:FF:FF");
    }
}
