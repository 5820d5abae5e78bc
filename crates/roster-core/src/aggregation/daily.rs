//! Daily views - filter, search, sort and group one day's snapshots

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::entities::{MemberSnapshot, Rank};
use crate::error::DomainError;

/// Stat-tile filters over a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyFilter {
    #[default]
    All,
    LowPower,
    LowLevel,
    AtRisk,
    LowDuelScore,
    CriticalDuelScore,
}

impl DailyFilter {
    pub fn matches(self, snapshot: &MemberSnapshot) -> bool {
        match self {
            Self::All => true,
            Self::LowPower => snapshot.is_low_power(),
            Self::LowLevel => snapshot.is_low_level(),
            Self::AtRisk => snapshot.is_at_risk(),
            Self::LowDuelScore => snapshot.is_low_duel(),
            Self::CriticalDuelScore => snapshot.is_critical_duel(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LowPower => "low_power",
            Self::LowLevel => "low_level",
            Self::AtRisk => "at_risk",
            Self::LowDuelScore => "low_duel_score",
            Self::CriticalDuelScore => "critical_duel_score",
        }
    }
}

impl fmt::Display for DailyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DailyFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "low_power" => Ok(Self::LowPower),
            "low_level" => Ok(Self::LowLevel),
            "at_risk" => Ok(Self::AtRisk),
            "low_duel_score" => Ok(Self::LowDuelScore),
            "critical_duel_score" => Ok(Self::CriticalDuelScore),
            other => Err(DomainError::ValidationError(format!("unknown filter: {other}"))),
        }
    }
}

/// Descending sort key of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Power,
    DuelScore,
}

impl SortKey {
    fn compare(self, a: &MemberSnapshot, b: &MemberSnapshot) -> Ordering {
        match self {
            Self::Power => b.power.total_cmp(&a.power),
            Self::DuelScore => b.duel_score.cmp(&a.duel_score),
        }
    }
}

/// Apply filter and case-insensitive name search, then sort descending.
///
/// The sort is stable, so ties keep the store's fetch order.
pub fn filter_and_sort(
    snapshots: &[MemberSnapshot],
    filter: DailyFilter,
    search: &str,
    sort_key: SortKey,
) -> Vec<MemberSnapshot> {
    let needle = search.to_lowercase();
    let mut out: Vec<MemberSnapshot> = snapshots
        .iter()
        .filter(|s| filter.matches(s))
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    out.sort_by(|a, b| sort_key.compare(a, b));
    out
}

/// One rank bucket of the roster view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankGroup {
    pub rank: Rank,
    pub members: Vec<MemberSnapshot>,
}

/// Split an already sorted list into R3, R2, R1 buckets.
///
/// All three buckets are always present; each keeps the input order.
pub fn group_by_rank(sorted: &[MemberSnapshot]) -> Vec<RankGroup> {
    Rank::DISPLAY_ORDER
        .iter()
        .map(|&rank| RankGroup {
            rank,
            members: sorted.iter().filter(|s| s.rank == rank).cloned().collect(),
        })
        .collect()
}

/// Stat tiles over the unfiltered day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub total: usize,
    pub low_power: usize,
    pub low_level: usize,
    pub at_risk: usize,
    pub low_duel: usize,
    pub critical_duel: usize,
}

impl DailyStats {
    pub fn compute(snapshots: &[MemberSnapshot]) -> Self {
        snapshots.iter().fold(Self::default(), |mut acc, s| {
            acc.total += 1;
            acc.low_power += usize::from(s.is_low_power());
            acc.low_level += usize::from(s.is_low_level());
            acc.at_risk += usize::from(s.is_at_risk());
            acc.low_duel += usize::from(s.is_low_duel());
            acc.critical_duel += usize::from(s.is_critical_duel());
            acc
        })
    }
}
