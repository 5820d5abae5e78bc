//! Repository implementations

mod config;
pub mod error;
mod snapshot;

pub use config::PgConfigRepository;
pub use snapshot::PgSnapshotRepository;
