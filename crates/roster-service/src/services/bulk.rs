//! Bulk mutation service
//!
//! Every operation here ends in exactly one store batch, so it lands
//! completely or not at all.

use std::collections::HashSet;

use roster_core::{DomainError, MemberSnapshot, SnapshotDate, SnapshotId, SnapshotPatch};
use tracing::{info, instrument, warn};

use crate::dto::requests::parse_date;
use crate::dto::{AffectedResponse, BulkUpdateRequest, CopySelectionRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Bulk mutation service
pub struct BulkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BulkService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Copy the previous day onto `target` with duel scores zeroed
    #[instrument(skip(self))]
    pub async fn copy_previous_day(&self, target: SnapshotDate) -> ServiceResult<AffectedResponse> {
        let source = target
            .prev_day()
            .ok_or_else(|| DomainError::InvalidDate(target.to_string()))?;

        let previous = self.ctx.snapshot_repo().find_by_date(source).await?;
        let copies: Vec<MemberSnapshot> =
            previous.iter().map(|s| s.copy_to(target, false)).collect();

        let affected = self.put_all(&copies).await?;
        info!(%source, %target, count = affected, "Copied previous day");

        Ok(AffectedResponse::new(affected))
    }

    /// Copy selected snapshots onto any date, keeping their duel scores.
    ///
    /// IDs that no longer exist are skipped.
    #[instrument(skip(self, request), fields(count = request.ids.len()))]
    pub async fn copy_selection(&self, request: CopySelectionRequest) -> ServiceResult<AffectedResponse> {
        let target = parse_date(&request.target_date)?;
        let ids = request.snapshot_ids();

        let selected = self.ctx.snapshot_repo().find_by_ids(&ids).await?;
        if selected.len() < ids.len() {
            warn!(
                requested = ids.len(),
                found = selected.len(),
                "Some selected snapshots no longer exist"
            );
        }

        let copies: Vec<MemberSnapshot> =
            selected.iter().map(|s| s.copy_to(target, true)).collect();

        let affected = self.put_all(&copies).await?;
        info!(%target, count = affected, "Copied selection");

        Ok(AffectedResponse::new(affected))
    }

    /// Zero every duel score of one day
    #[instrument(skip(self))]
    pub async fn reset_day(&self, date: SnapshotDate) -> ServiceResult<AffectedResponse> {
        let ids: Vec<SnapshotId> = self
            .ctx
            .snapshot_repo()
            .find_by_date(date)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let affected = self.update_all(&ids, &SnapshotPatch::reset_duel()).await?;
        info!(%date, count = affected, "Reset duel scores");

        Ok(AffectedResponse::new(affected))
    }

    /// Delete later snapshots of a name already seen that day.
    ///
    /// Names compare trimmed and case-insensitive in store order; the first
    /// one wins. Blank names share the empty key like any other name.
    #[instrument(skip(self))]
    pub async fn deduplicate(&self, date: SnapshotDate) -> ServiceResult<AffectedResponse> {
        let day = self.ctx.snapshot_repo().find_by_date(date).await?;
        let duplicates = duplicate_ids(&day);

        if duplicates.is_empty() {
            return Ok(AffectedResponse::new(0));
        }

        let affected = self.ctx.snapshot_repo().batch_delete(&duplicates).await?;
        info!(%date, count = affected, "Removed duplicate snapshots");

        Ok(AffectedResponse::new(affected))
    }

    /// Apply the filled-in fields to every selected snapshot
    #[instrument(skip(self, request), fields(count = request.ids.len()))]
    pub async fn bulk_update(&self, request: BulkUpdateRequest) -> ServiceResult<AffectedResponse> {
        let patch = request.to_patch()?;
        let ids = request.snapshot_ids();

        let affected = self.update_all(&ids, &patch).await?;
        info!(count = affected, "Bulk updated snapshots");

        Ok(AffectedResponse::new(affected))
    }

    async fn put_all(&self, snapshots: &[MemberSnapshot]) -> ServiceResult<u64> {
        if snapshots.is_empty() {
            return Ok(0);
        }
        self.ctx.snapshot_repo().batch_put(snapshots).await?;
        Ok(snapshots.len() as u64)
    }

    async fn update_all(&self, ids: &[SnapshotId], patch: &SnapshotPatch) -> ServiceResult<u64> {
        if ids.is_empty() || patch.is_empty() {
            return Ok(0);
        }
        Ok(self.ctx.snapshot_repo().batch_update(ids, patch).await?)
    }
}

fn duplicate_ids(day: &[MemberSnapshot]) -> Vec<SnapshotId> {
    let mut seen = HashSet::new();
    day.iter()
        .filter(|s| {
            let key = s.dedupe_key();
            !seen.insert(key)
        })
        .map(|s| s.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::context::test_support::memory_context;
    use crate::services::error::ServiceError;
    use roster_core::Rank;

    fn date(d: u32) -> SnapshotDate {
        SnapshotDate::from_ymd(2024, 5, d).unwrap()
    }

    fn member(d: u32, name: &str, duel_score: u64) -> MemberSnapshot {
        let mut s = MemberSnapshot::new(date(d), name);
        s.power = 12.0;
        s.duel_score = duel_score;
        s
    }

    #[tokio::test]
    async fn test_copy_previous_day_zeroes_duel() {
        let (ctx, store) = memory_context(vec![
            member(5, "Anna", 3_000_000),
            member(5, "Bob", 4_000_000),
        ]);

        let result = BulkService::new(&ctx).copy_previous_day(date(6)).await.unwrap();

        assert_eq!(result.affected, 2);
        let copies: Vec<_> = store.snapshot_all().into_iter().filter(|s| s.date == date(6)).collect();
        assert_eq!(copies.len(), 2);
        assert!(copies.iter().all(|s| s.duel_score == 0 && s.power == 12.0));
        assert!(copies.iter().all(|s| s.id.as_str().starts_with("2024-05-06_")));
    }

    #[tokio::test]
    async fn test_copy_selection_keeps_duel() {
        let anna = member(5, "Anna", 3_000_000);
        let request = CopySelectionRequest {
            ids: vec![anna.id.to_string(), "gone".to_string()],
            target_date: "2024-05-09".to_string(),
        };
        let (ctx, store) = memory_context(vec![anna]);

        let result = BulkService::new(&ctx).copy_selection(request).await.unwrap();

        assert_eq!(result.affected, 1);
        let copy = store
            .snapshot_all()
            .into_iter()
            .find(|s| s.date == date(9))
            .unwrap();
        assert_eq!(copy.duel_score, 3_000_000);
    }

    #[tokio::test]
    async fn test_reset_day() {
        let (ctx, store) = memory_context(vec![
            member(6, "Anna", 3_000_000),
            member(6, "Bob", 4_000_000),
            member(7, "Anna", 5_000_000),
        ]);

        let result = BulkService::new(&ctx).reset_day(date(6)).await.unwrap();

        assert_eq!(result.affected, 2);
        let scores: Vec<u64> = store.snapshot_all().iter().map(|s| s.duel_score).collect();
        assert_eq!(scores, vec![0, 0, 5_000_000]);
    }

    #[tokio::test]
    async fn test_deduplicate_is_idempotent() {
        let first = member(6, "Anna", 1);
        let keep_id = first.id.clone();
        let (ctx, store) = memory_context(vec![
            first,
            member(6, " anna ", 2),
            member(6, "ANNA", 3),
            member(6, "Bob", 4),
            member(6, "", 5),
            member(6, "  ", 6),
        ]);
        let service = BulkService::new(&ctx);

        assert_eq!(service.deduplicate(date(6)).await.unwrap().affected, 3);
        assert_eq!(service.deduplicate(date(6)).await.unwrap().affected, 0);

        let remaining = store.snapshot_all();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0].id, keep_id);
    }

    #[tokio::test]
    async fn test_deduplicate_collapses_blank_names() {
        let first = member(6, "", 1);
        let keep_id = first.id.clone();
        let (ctx, store) = memory_context(vec![first, member(6, "  ", 2), member(6, "", 3)]);

        let result = BulkService::new(&ctx).deduplicate(date(6)).await.unwrap();

        assert_eq!(result.affected, 2);
        let remaining = store.snapshot_all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep_id);
    }

    #[tokio::test]
    async fn test_bulk_update_applies_only_filled_fields() {
        let anna = member(6, "Anna", 1_000);
        let bob = member(6, "Bob", 2_000);
        let request = BulkUpdateRequest {
            ids: vec![anna.id.to_string(), bob.id.to_string()],
            rank: Some("R2".to_string()),
            power: Some(String::new()),
            ..BulkUpdateRequest::default()
        };
        let (ctx, store) = memory_context(vec![anna, bob]);

        let result = BulkService::new(&ctx).bulk_update(request).await.unwrap();

        assert_eq!(result.affected, 2);
        for s in store.snapshot_all() {
            assert_eq!(s.rank, Rank::R2);
            assert_eq!(s.power, 12.0);
        }
    }

    #[tokio::test]
    async fn test_bulk_update_without_fields_is_noop() {
        let anna = member(6, "Anna", 1_000);
        let request = BulkUpdateRequest {
            ids: vec![anna.id.to_string()],
            ..BulkUpdateRequest::default()
        };
        let (ctx, _) = memory_context(vec![anna]);

        assert_eq!(BulkService::new(&ctx).bulk_update(request).await.unwrap().affected, 0);
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_store_untouched() {
        let (ctx, store) = memory_context(vec![
            member(6, "Anna", 3_000_000),
            member(6, "Bob", 4_000_000),
            member(6, "Cleo", 5_000_000),
        ]);
        store.fail_next_batch_after(1);

        let err = BulkService::new(&ctx).reset_day(date(6)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Domain(DomainError::DatabaseError(_))));
        assert!(store.snapshot_all().iter().all(|s| s.duel_score > 0));
    }

    #[tokio::test]
    async fn test_failed_copy_writes_nothing() {
        let (ctx, store) = memory_context(vec![
            member(5, "Anna", 1),
            member(5, "Bob", 2),
        ]);
        store.fail_next_batch_after(1);

        assert!(BulkService::new(&ctx).copy_previous_day(date(6)).await.is_err());
        assert_eq!(store.len(), 2);
    }
}
