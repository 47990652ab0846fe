// apswap-core: Text extraction and location matching between controller
// CLI captures and an AP tracking spreadsheet.

pub mod error;
pub mod matcher;
pub mod model;
pub mod parse;
pub mod segment;
pub mod source;
pub mod tracking;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use matcher::{Projection, build_lookup, count_matched, match_inventories, project, short_name};
pub use parse::{DEFAULT_IDENTITY_PREFIXES, parse_cdp, parse_identity, parse_identity_default};
pub use segment::{SectionKind, SectionStats, Sections, segment, segment_text};
pub use source::{Inventories, InventorySource, LoadOptions, load_inventories};
pub use tracking::{TrackingRow, TrackingSheet, default_output_path, read_sheet, write_sheet};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CdpRecord, CdpTable, IdentityRecord, IdentityTable, JoinKey, LookupTable, MacAddress,
};
