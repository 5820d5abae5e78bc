//! Progress service
//!
//! Builds the power and duel history matrices over a date range.

use roster_core::{
    build_progress_matrix, date_axis, DomainError, ProgressMode, SnapshotDate,
};
use tracing::{instrument, warn};

use crate::dto::ProgressResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Progress service
pub struct ProgressService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn power(&self, start: SnapshotDate, end: SnapshotDate) -> ServiceResult<ProgressResponse> {
        self.matrix(start, end, ProgressMode::Power).await
    }

    #[instrument(skip(self))]
    pub async fn duel(&self, start: SnapshotDate, end: SnapshotDate) -> ServiceResult<ProgressResponse> {
        self.matrix(start, end, ProgressMode::Duel).await
    }

    /// Long ranges cap the columns; the whole range is still fetched and totaled
    async fn matrix(
        &self,
        start: SnapshotDate,
        end: SnapshotDate,
        mode: ProgressMode,
    ) -> ServiceResult<ProgressResponse> {
        if start > end {
            return Err(DomainError::InvalidDateRange { start, end }.into());
        }

        let axis = date_axis(start, end);
        let capped = axis.last().is_some_and(|last| *last < end);

        let snapshots = self
            .ctx
            .snapshot_repo()
            .find_by_date_range(start, end)
            .await
            .unwrap_or_else(|e| {
                warn!(%start, %end, error = %e, "Failed to fetch progress range");
                Vec::new()
            });

        Ok(ProgressResponse {
            start,
            end,
            capped,
            matrix: build_progress_matrix(&snapshots, &axis, mode),
        })
    }
}
