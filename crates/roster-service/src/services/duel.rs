//! Weekly duel service

use roster_core::{week_dates, weekly_rollup, SnapshotDate};
use tracing::{instrument, warn};

use crate::dto::{WeeklyDuelResponse, WeeklyScoreResponse};

use super::context::ServiceContext;

/// Weekly duel service
pub struct DuelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DuelService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Duel totals from Monday through `anchor`, highest first
    #[instrument(skip(self))]
    pub async fn weekly(&self, anchor: SnapshotDate) -> WeeklyDuelResponse {
        let dates = week_dates(anchor);
        let week_start = dates.first().copied().unwrap_or(anchor);

        let snapshots = self
            .ctx
            .snapshot_repo()
            .find_by_dates(&dates)
            .await
            .unwrap_or_else(|e| {
                warn!(%week_start, %anchor, error = %e, "Failed to fetch week");
                Vec::new()
            });

        WeeklyDuelResponse {
            week_start,
            anchor,
            scores: weekly_rollup(&snapshots, anchor)
                .into_iter()
                .enumerate()
                .map(|(i, score)| WeeklyScoreResponse::ranked(i + 1, score))
                .collect(),
        }
    }
}
