//! Entity ↔ Model mappers

mod config;
mod snapshot;

pub(crate) use snapshot::to_entities;
pub use snapshot::SnapshotInsert;
