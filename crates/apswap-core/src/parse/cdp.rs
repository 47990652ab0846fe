// ── `show ap cdp neighbors` parser ──
//
// AP Name    AP IP        Neighbor Name          Neighbor IP    Neighbor Port
// --------   -----------  ---------------------  -------------  -------------
// AP01       10.10.1.21   sw-idf1.corp.example   10.10.1.2      Gi1/0/1

use tracing::{debug, trace};

use super::contains_any;
use crate::model::{CdpRecord, CdpTable};

/// Header, separator and footer markers.
const SKIP_MARKERS: &[&str] = &["---", "AP Name", "Number of neighbors"];

const MIN_FIELDS: usize = 5;

/// Parse CDP neighbor rows into AP name -> (neighbor, port).
///
/// Field 0 is the AP name, field 2 the neighbor name, field 4 the port.
/// Rows whose first field is all digits are wrapped continuation lines
/// and are skipped. A later row for the same AP replaces the earlier one.
pub fn parse_cdp<I, S>(lines: I) -> CdpTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = CdpTable::new();

    for line in lines {
        let line = line.as_ref();
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS || contains_any(line, SKIP_MARKERS) {
            trace!(line, "skipping non-data CDP line");
            continue;
        }

        let (ap_name, neighbor, port) = (fields[0], fields[2], fields[4]);
        if ap_name.chars().all(|c| c.is_ascii_digit()) {
            trace!(line, "skipping continuation line");
            continue;
        }

        let record = CdpRecord {
            neighbor: neighbor.to_owned(),
            port: port.to_owned(),
        };
        if let Some(previous) = table.insert(ap_name.to_owned(), record) {
            debug!(ap = ap_name, ?previous, "duplicate CDP row, keeping the later one");
        }
    }

    table
}
