// ── Domain model ──

pub mod inventory;
pub mod mac;

pub use inventory::{CdpRecord, CdpTable, IdentityRecord, IdentityTable, JoinKey, LookupTable};
pub use mac::MacAddress;
