//! Tabular text parsers for controller show-command output.
//!
//! Both parsers are best-effort: any line that doesn't fit the expected
//! column shape (headers, separators, footers, wrapped continuation lines)
//! is skipped, never reported as an error.

pub mod cdp;
pub mod identity;

pub use cdp::parse_cdp;
pub use identity::{DEFAULT_IDENTITY_PREFIXES, parse_identity, parse_identity_default};

/// `true` if `line` contains any of `markers` verbatim.
fn contains_any(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| line.contains(m))
}
