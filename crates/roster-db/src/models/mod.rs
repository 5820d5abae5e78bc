//! Database models - direct mapping to PostgreSQL tables

mod config;
mod snapshot;

pub use config::AllianceConfigModel;
pub use snapshot::SnapshotModel;
