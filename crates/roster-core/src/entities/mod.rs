//! Domain entities - core business objects

mod config;
mod patch;
mod rank;
mod snapshot;
pub mod thresholds;

pub use config::{AllianceConfig, AllianceConfigPatch, DEFAULT_ALLIANCE_NAME, DEFAULT_LOGO_URL};
pub use patch::SnapshotPatch;
pub use rank::{Rank, RankParseError};
pub use snapshot::{DuelAlert, MemberSnapshot};
