//! In-memory record store
//!
//! Keeps snapshots in insertion order behind a `parking_lot::RwLock`. Batches
//! are applied to a copy of the table that replaces the original only when
//! every write succeeded. Failures can be injected to exercise the
//! all-or-nothing path.

mod config;
mod snapshot;

pub use config::InMemoryConfigStore;
pub use snapshot::InMemorySnapshotStore;
