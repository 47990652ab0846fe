// ── MacAddress ──
//
// Controller output prints MACs in Cisco dotted-quad notation
// (`6cef.abcd.1234`); the tracking sheet wants the colon-separated
// uppercase form (`6C:EF:AB:CD:12:34`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MAC address, canonicalized to uppercase colon-separated octet pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    /// Canonicalize a MAC token from any common notation.
    ///
    /// Strips `.`, `:` and `-`, regroups the remaining characters into
    /// 2-character chunks from the left, joins them with `:` and uppercases.
    /// Input is not validated: a token without exactly 12 hex digits still
    /// canonicalizes, with a shorter trailing group where needed.
    pub fn canonicalize(raw: impl AsRef<str>) -> Self {
        let digits: Vec<char> = raw
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, '.' | ':' | '-'))
            .collect();

        let groups: Vec<String> = digits
            .chunks(2)
            .map(|pair| pair.iter().collect())
            .collect();

        Self(groups.join(":").to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::canonicalize(s))
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}
