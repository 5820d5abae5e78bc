//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every `batch_*` method is all-or-nothing:
//! either every write lands or none does.

use async_trait::async_trait;

use crate::entities::{AllianceConfig, AllianceConfigPatch, MemberSnapshot, SnapshotPatch};
use crate::error::DomainError;
use crate::value_objects::{SnapshotDate, SnapshotId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Snapshot Repository
// ============================================================================

/// Store of member snapshots.
///
/// Listing methods return records in the store's fetch order, which callers
/// rely on for first-seen-wins semantics.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Find snapshot by ID
    async fn find_by_id(&self, id: &SnapshotId) -> RepoResult<Option<MemberSnapshot>>;

    /// Find the snapshots among `ids` that exist
    async fn find_by_ids(&self, ids: &[SnapshotId]) -> RepoResult<Vec<MemberSnapshot>>;

    /// All snapshots of one day
    async fn find_by_date(&self, date: SnapshotDate) -> RepoResult<Vec<MemberSnapshot>>;

    /// All snapshots with `start <= date <= end`
    async fn find_by_date_range(
        &self,
        start: SnapshotDate,
        end: SnapshotDate,
    ) -> RepoResult<Vec<MemberSnapshot>>;

    /// All snapshots whose date is one of `dates`
    async fn find_by_dates(&self, dates: &[SnapshotDate]) -> RepoResult<Vec<MemberSnapshot>>;

    /// Insert or replace by ID
    async fn put(&self, snapshot: &MemberSnapshot) -> RepoResult<()>;

    /// Delete by ID; `false` when nothing was stored under it
    async fn delete(&self, id: &SnapshotId) -> RepoResult<bool>;

    /// Insert or replace many snapshots atomically
    async fn batch_put(&self, snapshots: &[MemberSnapshot]) -> RepoResult<()>;

    /// Apply one patch to every ID atomically; a missing ID aborts the batch
    async fn batch_update(&self, ids: &[SnapshotId], patch: &SnapshotPatch) -> RepoResult<u64>;

    /// Delete every ID atomically; a missing ID aborts the batch
    async fn batch_delete(&self, ids: &[SnapshotId]) -> RepoResult<u64>;

    /// Check the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Config Repository
// ============================================================================

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Stored config, `None` when never written
    async fn load(&self) -> RepoResult<Option<AllianceConfig>>;

    /// Merge the set fields of `patch` into the stored config
    async fn merge(&self, patch: &AllianceConfigPatch) -> RepoResult<()>;
}
