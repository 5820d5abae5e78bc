//! Ports implemented by the infrastructure layer

mod recognition;
mod repositories;

pub use recognition::NameRecognizer;
pub use repositories::{ConfigRepository, RepoResult, SnapshotRepository};
