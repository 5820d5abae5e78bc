//! Weekly duel rollup - Monday-anchored totals keyed by member name

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;

use super::progress::date_axis;
use crate::entities::thresholds::{DAYS_PER_WEEK, DUEL_DISPLAY_DIVISOR};
use crate::entities::{MemberSnapshot, Rank};
use crate::value_objects::SnapshotDate;

/// One member's duel totals for the week up to the anchor date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub name: String,
    pub total_score: u64,
    pub yesterday_score: u64,
    /// Snapshots seen this week; not capped at 7
    pub days_count: u32,
    pub level: u8,
    pub rank: Rank,
    pub last_date: SnapshotDate,
}

impl WeeklyScore {
    fn start(snapshot: &MemberSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            total_score: 0,
            yesterday_score: 0,
            days_count: 0,
            level: snapshot.level,
            rank: snapshot.rank,
            last_date: snapshot.date,
        }
    }

    /// Participation as shown in the table, e.g. `3/7`
    pub fn participation(&self) -> String {
        format!("{}/{DAYS_PER_WEEK}", self.days_count)
    }

    pub fn total_millions(&self) -> f64 {
        self.total_score as f64 / DUEL_DISPLAY_DIVISOR
    }
}

/// Monday of the anchor's week through the anchor, inclusive
pub fn week_window(anchor: SnapshotDate) -> (SnapshotDate, SnapshotDate) {
    (anchor.week_start(), anchor)
}

/// Every date of the window, Monday first
pub fn week_dates(anchor: SnapshotDate) -> Vec<SnapshotDate> {
    let (monday, _) = week_window(anchor);
    date_axis(monday, anchor)
}

/// Fold a week of snapshots into per-name totals, highest total first.
///
/// Level, rank and last date follow the snapshot on the anchor date, or
/// otherwise the most recent one seen. Snapshots outside the window are
/// ignored.
pub fn weekly_rollup(snapshots: &[MemberSnapshot], anchor: SnapshotDate) -> Vec<WeeklyScore> {
    let (monday, _) = week_window(anchor);
    let yesterday = anchor.prev_day();

    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut scores: Vec<WeeklyScore> = Vec::new();

    for snapshot in snapshots
        .iter()
        .filter(|s| s.date >= monday && s.date <= anchor)
    {
        let idx = *order.entry(snapshot.name.as_str()).or_insert_with(|| {
            scores.push(WeeklyScore::start(snapshot));
            scores.len() - 1
        });
        let entry = &mut scores[idx];

        entry.total_score += snapshot.duel_score;
        entry.days_count += 1;

        if Some(snapshot.date) == yesterday {
            entry.yesterday_score = snapshot.duel_score;
        }

        if snapshot.date == anchor || snapshot.date > entry.last_date {
            entry.level = snapshot.level;
            entry.rank = snapshot.rank;
            entry.last_date = snapshot.date;
        }
    }

    scores.sort_by_key(|s| Reverse(s.total_score));
    scores
}
