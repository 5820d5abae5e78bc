//! Dashboard session state
//!
//! View state a dashboard client holds between requests: selected day,
//! active filter and search, theme, collapsed rank groups and the cached
//! day of snapshots.

use std::collections::HashSet;

use roster_core::{
    filter_and_sort, group_by_rank, DailyFilter, DailyStats, MemberSnapshot, Rank, RankGroup,
    SnapshotDate, SnapshotId, SortKey,
};
use serde::{Deserialize, Serialize};

use crate::services::{ServiceContext, ServiceError, ServiceResult, SnapshotService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    selected_date: SnapshotDate,
    filter: DailyFilter,
    search: String,
    theme: Theme,
    collapsed_ranks: HashSet<Rank>,
    snapshots: Vec<MemberSnapshot>,
    loading: bool,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(SnapshotDate::today())
    }
}

impl DashboardSession {
    pub fn new(selected_date: SnapshotDate) -> Self {
        Self {
            selected_date,
            filter: DailyFilter::All,
            search: String::new(),
            theme: Theme::default(),
            collapsed_ranks: HashSet::new(),
            snapshots: Vec::new(),
            loading: false,
        }
    }

    pub fn selected_date(&self) -> SnapshotDate {
        self.selected_date
    }

    pub fn filter(&self) -> DailyFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn snapshots(&self) -> &[MemberSnapshot] {
        &self.snapshots
    }

    /// Switch day; the filter goes back to `All` and the cache is dropped
    pub fn set_date(&mut self, date: SnapshotDate) {
        if date != self.selected_date {
            self.snapshots.clear();
        }
        self.selected_date = date;
        self.filter = DailyFilter::All;
    }

    pub fn set_filter(&mut self, filter: DailyFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Collapse or expand one rank group; returns whether it is now collapsed
    pub fn toggle_rank(&mut self, rank: Rank) -> bool {
        if self.collapsed_ranks.remove(&rank) {
            false
        } else {
            self.collapsed_ranks.insert(rank);
            true
        }
    }

    pub fn is_collapsed(&self, rank: Rank) -> bool {
        self.collapsed_ranks.contains(&rank)
    }

    /// Reload the selected day from the store
    pub async fn refresh(&mut self, ctx: &ServiceContext) {
        self.loading = true;
        self.snapshots = SnapshotService::new(ctx).load_day(self.selected_date).await;
        self.loading = false;
    }

    /// Delete in the store, then drop the cached row
    pub async fn delete(&mut self, ctx: &ServiceContext, id: &SnapshotId) -> ServiceResult<()> {
        SnapshotService::new(ctx).delete(id).await?;
        self.snapshots.retain(|s| &s.id != id);
        Ok(())
    }

    /// Stat tiles over the whole cached day
    pub fn stats(&self) -> DailyStats {
        DailyStats::compute(&self.snapshots)
    }

    /// Cached day through the active filter and search, grouped by rank
    pub fn roster(&self) -> Vec<RankGroup> {
        let sorted = filter_and_sort(&self.snapshots, self.filter, &self.search, SortKey::Power);
        group_by_rank(&sorted)
    }

    /// Cached snapshot by ID, for the edit form
    pub fn find(&self, id: &SnapshotId) -> ServiceResult<&MemberSnapshot> {
        self.snapshots
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| ServiceError::not_found("Snapshot", id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::context::test_support::memory_context;

    fn date(d: u32) -> SnapshotDate {
        SnapshotDate::from_ymd(2024, 5, d).unwrap()
    }

    fn member(name: &str, power: f64) -> MemberSnapshot {
        let mut s = MemberSnapshot::new(date(6), name);
        s.power = power;
        s.team1_power = 5.0;
        s.level = 25;
        s
    }

    #[test]
    fn test_date_change_resets_filter() {
        let mut session = DashboardSession::new(date(6));
        session.set_filter(DailyFilter::AtRisk);
        session.set_search("an");

        session.set_date(date(7));

        assert_eq!(session.filter(), DailyFilter::All);
        assert_eq!(session.search(), "an");
        assert_eq!(session.selected_date(), date(7));
    }

    #[test]
    fn test_toggles() {
        let mut session = DashboardSession::new(date(6));
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert_eq!(session.toggle_theme(), Theme::Light);

        assert!(session.toggle_rank(Rank::R2));
        assert!(session.is_collapsed(Rank::R2));
        assert!(!session.toggle_rank(Rank::R2));
        assert!(!session.is_collapsed(Rank::R2));
    }

    #[tokio::test]
    async fn test_refresh_and_roster() {
        let (ctx, _) = memory_context(vec![member("Anna", 8.0), member("Bob", 15.0)]);
        let mut session = DashboardSession::new(date(6));

        session.refresh(&ctx).await;
        session.set_filter(DailyFilter::LowPower);

        assert!(!session.is_loading());
        assert_eq!(session.stats().total, 2);
        let r1 = &session.roster()[2];
        assert_eq!(r1.rank, Rank::R1);
        assert_eq!(r1.members.len(), 1);
        assert_eq!(r1.members[0].name, "Anna");
    }

    #[tokio::test]
    async fn test_delete_removes_locally_after_store() {
        let anna = member("Anna", 8.0);
        let id = anna.id.clone();
        let (ctx, store) = memory_context(vec![anna, member("Bob", 15.0)]);
        let mut session = DashboardSession::new(date(6));
        session.refresh(&ctx).await;

        session.delete(&ctx, &id).await.unwrap();

        assert_eq!(session.snapshots().len(), 1);
        assert_eq!(store.len(), 1);
        assert!(session.find(&id).is_err());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_local_row() {
        let (ctx, _) = memory_context(vec![member("Anna", 8.0)]);
        let mut session = DashboardSession::new(date(6));
        session.refresh(&ctx).await;

        let ghost = SnapshotId::new("missing");
        assert!(session.delete(&ctx, &ghost).await.is_err());
        assert_eq!(session.snapshots().len(), 1);
    }
}
