// ── Inventory records ──
//
// One record per AP name per parse. Tables are insertion-ordered maps:
// a repeated AP name replaces the earlier value in place (last write
// wins, first position kept).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// Where an AP is cabled, from `show ap cdp neighbors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdpRecord {
    /// Neighbor switch name, possibly fully qualified (`sw1.corp.example`).
    pub neighbor: String,
    /// Neighbor port identifier (`Gi1/0/1`, `Te2/0/48`, ...).
    pub port: String,
}

/// Hardware identity of an AP, from `show ap meraki monitoring summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub mac: MacAddress,
    pub serial: String,
    /// Serial issued by the Meraki cloud, distinct from the hardware serial.
    pub meraki_serial: String,
}

/// AP name -> CDP neighbor/port.
pub type CdpTable = IndexMap<String, CdpRecord>;

/// AP name -> MAC/serial/cloud serial.
pub type IdentityTable = IndexMap<String, IdentityRecord>;

/// A (neighbor-name-variant, port) pair identifying one physical switch port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JoinKey {
    pub neighbor: String,
    pub port: String,
}

impl JoinKey {
    pub fn new(neighbor: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            neighbor: neighbor.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.neighbor, self.port)
    }
}

/// Switch port -> identity of the AP now cabled there.
pub type LookupTable = IndexMap<JoinKey, IdentityRecord>;
