//! In-memory implementation of SnapshotRepository

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use tracing::instrument;

use roster_core::entities::{MemberSnapshot, SnapshotPatch};
use roster_core::error::DomainError;
use roster_core::traits::{RepoResult, SnapshotRepository};
use roster_core::value_objects::{SnapshotDate, SnapshotId};

/// Injected failure for the next batch
#[derive(Debug, Clone, Copy)]
struct BatchFault {
    /// Writes applied to the working copy before the batch fails
    after_writes: usize,
}

/// Snapshot table held in memory
#[derive(Default)]
pub struct InMemorySnapshotStore {
    rows: RwLock<Vec<MemberSnapshot>>,
    batch_fault: Mutex<Option<BatchFault>>,
    fail_reads: Mutex<bool>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `snapshots`, in the given order
    pub fn with_snapshots(snapshots: Vec<MemberSnapshot>) -> Self {
        Self {
            rows: RwLock::new(snapshots),
            ..Self::default()
        }
    }

    /// Make the next batch fail after `after_writes` of its writes
    pub fn fail_next_batch_after(&self, after_writes: usize) {
        *self.batch_fault.lock() = Some(BatchFault { after_writes });
    }

    /// Make every listing fail until switched off
    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock() = fail;
    }

    /// Copy of every stored snapshot, in insertion order
    pub fn snapshot_all(&self) -> Vec<MemberSnapshot> {
        self.rows.read().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn check_reads(&self) -> RepoResult<()> {
        if *self.fail_reads.lock() {
            return Err(DomainError::DatabaseError("injected read failure".to_string()));
        }
        Ok(())
    }

    fn select<F>(&self, predicate: F) -> RepoResult<Vec<MemberSnapshot>>
    where
        F: Fn(&MemberSnapshot) -> bool,
    {
        self.check_reads()?;
        Ok(self.rows.read().iter().filter(|s| predicate(s)).cloned().collect())
    }

    /// Run `writes` against a copy of the table and swap it in on success
    fn batch<F>(&self, writes: usize, mut apply: F) -> RepoResult<()>
    where
        F: FnMut(&mut Vec<MemberSnapshot>, usize) -> RepoResult<()>,
    {
        let fault = self.batch_fault.lock().take();
        let mut rows = self.rows.write();
        let mut working = rows.clone();

        for i in 0..writes {
            if fault.is_some_and(|f| f.after_writes == i) {
                return Err(DomainError::DatabaseError(format!(
                    "injected batch failure at write {i}"
                )));
            }
            apply(&mut working, i)?;
        }

        *rows = working;
        Ok(())
    }
}

fn upsert(rows: &mut Vec<MemberSnapshot>, snapshot: MemberSnapshot) {
    match rows.iter_mut().find(|s| s.id == snapshot.id) {
        Some(existing) => *existing = snapshot,
        None => rows.push(snapshot),
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotStore {
    async fn find_by_id(&self, id: &SnapshotId) -> RepoResult<Option<MemberSnapshot>> {
        self.check_reads()?;
        Ok(self.rows.read().iter().find(|s| &s.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[SnapshotId]) -> RepoResult<Vec<MemberSnapshot>> {
        let wanted: HashSet<&SnapshotId> = ids.iter().collect();
        self.select(|s| wanted.contains(&s.id))
    }

    async fn find_by_date(&self, date: SnapshotDate) -> RepoResult<Vec<MemberSnapshot>> {
        self.select(|s| s.date == date)
    }

    async fn find_by_date_range(
        &self,
        start: SnapshotDate,
        end: SnapshotDate,
    ) -> RepoResult<Vec<MemberSnapshot>> {
        self.select(|s| s.date >= start && s.date <= end)
    }

    async fn find_by_dates(&self, dates: &[SnapshotDate]) -> RepoResult<Vec<MemberSnapshot>> {
        self.select(|s| dates.contains(&s.date))
    }

    #[instrument(skip(self, snapshot), fields(id = %snapshot.id))]
    async fn put(&self, snapshot: &MemberSnapshot) -> RepoResult<()> {
        upsert(&mut self.rows.write(), snapshot.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &SnapshotId) -> RepoResult<bool> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|s| &s.id != id);
        Ok(rows.len() < before)
    }

    #[instrument(skip(self, snapshots), fields(count = snapshots.len()))]
    async fn batch_put(&self, snapshots: &[MemberSnapshot]) -> RepoResult<()> {
        self.batch(snapshots.len(), |rows, i| {
            upsert(rows, snapshots[i].clone());
            Ok(())
        })
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn batch_update(&self, ids: &[SnapshotId], patch: &SnapshotPatch) -> RepoResult<u64> {
        self.batch(ids.len(), |rows, i| {
            let row = rows
                .iter_mut()
                .find(|s| s.id == ids[i])
                .ok_or_else(|| DomainError::SnapshotNotFound(ids[i].clone()))?;
            row.apply(patch);
            row.touch();
            Ok(())
        })?;

        Ok(ids.len() as u64)
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn batch_delete(&self, ids: &[SnapshotId]) -> RepoResult<u64> {
        self.batch(ids.len(), |rows, i| {
            let pos = rows
                .iter()
                .position(|s| s.id == ids[i])
                .ok_or_else(|| DomainError::SnapshotNotFound(ids[i].clone()))?;
            rows.remove(pos);
            Ok(())
        })?;

        Ok(ids.len() as u64)
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check_reads()
    }
}
