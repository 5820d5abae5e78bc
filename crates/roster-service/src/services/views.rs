//! View service
//!
//! Daily roster, power ranking, duel ranking and stat tiles. All of them
//! read one day and fold it in memory.

use roster_core::{
    filter_and_sort, group_by_rank, DailyFilter, DailyStats, MemberSnapshot, SnapshotDate, SortKey,
};
use tracing::instrument;

use crate::dto::{RankGroupResponse, RankingResponse, RosterResponse, SnapshotResponse, StatsResponse};

use super::context::ServiceContext;
use super::snapshot::SnapshotService;

/// View service
pub struct ViewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn day(&self, date: SnapshotDate) -> Vec<MemberSnapshot> {
        SnapshotService::new(self.ctx).load_day(date).await
    }

    /// Members grouped R3, R2, R1, each group by power descending.
    ///
    /// Stats cover the whole day regardless of filter and search.
    #[instrument(skip(self))]
    pub async fn roster(
        &self,
        date: SnapshotDate,
        filter: DailyFilter,
        search: &str,
    ) -> RosterResponse {
        let day = self.day(date).await;
        let sorted = filter_and_sort(&day, filter, search, SortKey::Power);

        RosterResponse {
            date,
            filter,
            stats: DailyStats::compute(&day).into(),
            groups: group_by_rank(&sorted)
                .into_iter()
                .map(RankGroupResponse::from)
                .collect(),
        }
    }

    #[instrument(skip(self))]
    pub async fn power_ranking(
        &self,
        date: SnapshotDate,
        filter: DailyFilter,
        search: &str,
    ) -> RankingResponse {
        self.ranking(date, filter, search, SortKey::Power).await
    }

    #[instrument(skip(self))]
    pub async fn duel_ranking(
        &self,
        date: SnapshotDate,
        filter: DailyFilter,
        search: &str,
    ) -> RankingResponse {
        self.ranking(date, filter, search, SortKey::DuelScore).await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, date: SnapshotDate) -> StatsResponse {
        DailyStats::compute(&self.day(date).await).into()
    }

    async fn ranking(
        &self,
        date: SnapshotDate,
        filter: DailyFilter,
        search: &str,
        sort_key: SortKey,
    ) -> RankingResponse {
        let day = self.day(date).await;

        RankingResponse {
            date,
            filter,
            members: filter_and_sort(&day, filter, search, sort_key)
                .iter()
                .map(SnapshotResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::context::test_support::memory_context;
    use roster_core::Rank;

    fn date() -> SnapshotDate {
        SnapshotDate::from_ymd(2024, 5, 6).unwrap()
    }

    fn member(name: &str, power: f64, rank: Rank, duel_score: u64) -> MemberSnapshot {
        let mut s = MemberSnapshot::new(date(), name);
        s.power = power;
        s.rank = rank;
        s.team1_power = 5.0;
        s.level = 25;
        s.duel_score = duel_score;
        s
    }

    fn day() -> Vec<MemberSnapshot> {
        vec![
            member("Anna", 8.0, Rank::R1, 3_000_000),
            member("Hans", 9.0, Rank::R3, 500_000),
            member("Bob", 7.0, Rank::R1, 4_000_000),
            member("Zed", 20.0, Rank::R2, 1_500_000),
        ]
    }

    #[tokio::test]
    async fn test_roster_filter_search_composition() {
        let (ctx, _) = memory_context(day());

        let view = ViewService::new(&ctx)
            .roster(date(), DailyFilter::LowPower, "an")
            .await;

        let names: Vec<Vec<&str>> = view
            .groups
            .iter()
            .map(|g| g.members.iter().map(|m| m.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["Hans"], vec![], vec!["Anna"]]);
        assert_eq!(view.stats.total, 4);
        assert_eq!(view.stats.low_power, 3);
    }

    #[tokio::test]
    async fn test_duel_ranking_sorts_by_score() {
        let (ctx, _) = memory_context(day());

        let view = ViewService::new(&ctx)
            .duel_ranking(date(), DailyFilter::All, "")
            .await;

        let names: Vec<&str> = view.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Anna", "Zed", "Hans"]);
    }

    #[tokio::test]
    async fn test_stats_on_failed_fetch_are_zero() {
        let (ctx, store) = memory_context(day());
        store.set_fail_reads(true);

        let stats = ViewService::new(&ctx).stats(date()).await;
        assert_eq!(stats.total, 0);
    }
}
