//! Progress matrices - per-member history across a bounded date range

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::entities::thresholds::{DAILY_DUEL_ALLOTMENT, LOW_LEVEL, LOW_POWER};
use crate::entities::{MemberSnapshot, Rank};
use crate::value_objects::{SnapshotDate, SnapshotId};

/// Upper bound on generated columns, whatever range was asked for
pub const MAX_AXIS_LEN: usize = 32;

/// Column dates from `start` to `end` inclusive, capped at [`MAX_AXIS_LEN`].
///
/// An inverted range yields no columns.
pub fn date_axis(start: SnapshotDate, end: SnapshotDate) -> Vec<SnapshotDate> {
    let mut dates = Vec::new();
    let mut current = Some(start);

    while let Some(day) = current.filter(|d| *d <= end) {
        dates.push(day);
        if dates.len() >= MAX_AXIS_LEN {
            break;
        }
        current = day.next_day();
    }

    dates
}

/// Values recorded for one member on one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub power: f64,
    pub level: u8,
    pub duel_score: u64,
}

impl From<&MemberSnapshot> for DataPoint {
    fn from(s: &MemberSnapshot) -> Self {
        Self {
            power: s.power,
            level: s.level,
            duel_score: s.duel_score,
        }
    }
}

/// One member's history over the requested range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub name: String,
    /// ID of the latest snapshot in range
    pub id: SnapshotId,
    pub rank: Rank,
    /// Sparse; dates without a snapshot are absent
    pub data_points: BTreeMap<SnapshotDate, DataPoint>,
    pub start_power: f64,
    pub end_power: f64,
    pub total_growth: f64,
    pub total_duel_score: u64,
}

struct EntryBuilder {
    name: String,
    id: SnapshotId,
    rank: Rank,
    latest: SnapshotDate,
    data_points: BTreeMap<SnapshotDate, DataPoint>,
}

impl EntryBuilder {
    fn finish(self) -> ProgressEntry {
        let start_power = self.data_points.values().next().map_or(0.0, |p| p.power);
        let end_power = self.data_points.values().next_back().map_or(0.0, |p| p.power);
        let total_duel_score = self.data_points.values().map(|p| p.duel_score).sum();

        ProgressEntry {
            name: self.name,
            id: self.id,
            rank: self.rank,
            data_points: self.data_points,
            start_power,
            end_power,
            total_growth: end_power - start_power,
            total_duel_score,
        }
    }
}

/// Fold snapshots into one entry per member name, in first-seen order.
///
/// Two snapshots of the same name on the same date collapse to the one
/// fetched last, for both the data point and the descriptive fields.
pub fn fold_progress(snapshots: &[MemberSnapshot]) -> Vec<ProgressEntry> {
    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut builders: Vec<EntryBuilder> = Vec::new();

    for snapshot in snapshots {
        let idx = *order.entry(snapshot.name.as_str()).or_insert_with(|| {
            builders.push(EntryBuilder {
                name: snapshot.name.clone(),
                id: snapshot.id.clone(),
                rank: snapshot.rank,
                latest: snapshot.date,
                data_points: BTreeMap::new(),
            });
            builders.len() - 1
        });
        let builder = &mut builders[idx];

        builder.data_points.insert(snapshot.date, DataPoint::from(snapshot));
        if snapshot.date >= builder.latest {
            builder.id = snapshot.id.clone();
            builder.rank = snapshot.rank;
            builder.latest = snapshot.date;
        }
    }

    builders.into_iter().map(EntryBuilder::finish).collect()
}

/// Which history a matrix presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMode {
    Power,
    Duel,
}

/// Power color relative to the previous present date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerTone {
    Low,
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTone {
    Low,
    Normal,
}

/// Duel color against the daily allotment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelTone {
    Idle,
    Partial,
    Full,
}

impl DuelTone {
    pub fn of(duel_score: u64) -> Self {
        match duel_score {
            0 => Self::Idle,
            s if s <= DAILY_DUEL_ALLOTMENT => Self::Partial,
            _ => Self::Full,
        }
    }
}

/// A present cell of the matrix; absent dates are `None` in the row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressCell {
    Power {
        power: f64,
        level: u8,
        power_tone: PowerTone,
        level_tone: LevelTone,
    },
    Duel {
        duel_score: u64,
        tone: DuelTone,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRow {
    #[serde(flatten)]
    pub entry: ProgressEntry,
    /// One slot per axis date
    pub cells: Vec<Option<ProgressCell>>,
    /// Share of the full duel allotment over the axis, duel mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duel_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressMatrix {
    pub mode: ProgressMode,
    pub dates: Vec<SnapshotDate>,
    pub rows: Vec<ProgressRow>,
}

/// Fold, sort and color snapshots into a matrix over `axis`.
///
/// Every snapshot feeds the totals, including dates past a capped axis; only
/// the cells follow the axis. Power mode sorts by end power, duel mode by
/// total duel score, both descending and stable.
pub fn build_progress_matrix(
    snapshots: &[MemberSnapshot],
    axis: &[SnapshotDate],
    mode: ProgressMode,
) -> ProgressMatrix {
    let mut entries = fold_progress(snapshots);
    match mode {
        ProgressMode::Power => entries.sort_by(|a, b| b.end_power.total_cmp(&a.end_power)),
        ProgressMode::Duel => entries.sort_by(|a, b| b.total_duel_score.cmp(&a.total_duel_score)),
    }

    let rows = entries
        .into_iter()
        .map(|entry| {
            let cells = axis
                .iter()
                .map(|date| match mode {
                    ProgressMode::Power => power_cell(&entry, *date),
                    ProgressMode::Duel => entry.data_points.get(date).map(|p| ProgressCell::Duel {
                        duel_score: p.duel_score,
                        tone: DuelTone::of(p.duel_score),
                    }),
                })
                .collect();
            let duel_ratio = (mode == ProgressMode::Duel)
                .then(|| duel_ratio(entry.total_duel_score, axis.len()));

            ProgressRow {
                entry,
                cells,
                duel_ratio,
            }
        })
        .collect();

    ProgressMatrix {
        mode,
        dates: axis.to_vec(),
        rows,
    }
}

fn power_cell(entry: &ProgressEntry, date: SnapshotDate) -> Option<ProgressCell> {
    let point = entry.data_points.get(&date)?;
    let previous = entry.data_points.range(..date).next_back().map(|(_, p)| p.power);

    let power_tone = if point.power < LOW_POWER {
        PowerTone::Low
    } else {
        match previous {
            Some(prev) if point.power > prev => PowerTone::Up,
            Some(prev) if point.power < prev => PowerTone::Down,
            _ => PowerTone::Flat,
        }
    };
    let level_tone = if point.level < LOW_LEVEL {
        LevelTone::Low
    } else {
        LevelTone::Normal
    };

    Some(ProgressCell::Power {
        power: point.power,
        level: point.level,
        power_tone,
        level_tone,
    })
}

fn duel_ratio(total: u64, columns: usize) -> f64 {
    if columns == 0 {
        return 0.0;
    }
    let capacity = columns as f64 * DAILY_DUEL_ALLOTMENT as f64;
    (total as f64 / capacity).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> SnapshotDate {
        SnapshotDate::from_ymd(2024, m, d).unwrap()
    }

    fn snap(name: &str, date: SnapshotDate, power: f64, duel_score: u64) -> MemberSnapshot {
        let mut s = MemberSnapshot::new(date, name);
        s.power = power;
        s.level = 25;
        s.duel_score = duel_score;
        s
    }

    #[test]
    fn test_axis_caps_long_ranges() {
        let axis = date_axis(date(1, 1), date(3, 1));
        assert_eq!(axis.len(), MAX_AXIS_LEN);
        assert_eq!(axis[0], date(1, 1));
        assert_eq!(axis[31], date(2, 1));
    }

    #[test]
    fn test_axis_short_and_inverted() {
        assert_eq!(date_axis(date(1, 1), date(1, 3)), vec![date(1, 1), date(1, 2), date(1, 3)]);
        assert_eq!(date_axis(date(1, 1), date(1, 1)), vec![date(1, 1)]);
        assert!(date_axis(date(1, 3), date(1, 1)).is_empty());
    }

    #[test]
    fn test_growth_with_absent_day() {
        let snapshots = vec![snap("A", date(1, 1), 5.0, 0), snap("A", date(1, 3), 8.0, 0)];
        let entries = fold_progress(&snapshots);
        let a = &entries[0];

        assert_eq!(a.start_power, 5.0);
        assert_eq!(a.end_power, 8.0);
        assert_eq!(a.total_growth, 3.0);
        assert!(!a.data_points.contains_key(&date(1, 2)));

        let matrix = build_progress_matrix(
            &snapshots,
            &date_axis(date(1, 1), date(1, 3)),
            ProgressMode::Power,
        );
        assert!(matrix.rows[0].cells[1].is_none());
    }

    #[test]
    fn test_single_date_has_zero_growth() {
        let entries = fold_progress(&[snap("A", date(1, 2), 12.0, 3)]);
        assert_eq!(entries[0].total_growth, 0.0);
        assert_eq!(entries[0].total_duel_score, 3);
    }

    #[test]
    fn test_latest_record_sets_rank_and_id() {
        let mut early = snap("A", date(1, 3), 5.0, 0);
        early.rank = Rank::R3;
        let mut late = snap("A", date(1, 1), 4.0, 0);
        late.rank = Rank::R1;

        let entries = fold_progress(&[early.clone(), late]);
        assert_eq!(entries[0].rank, Rank::R3);
        assert_eq!(entries[0].id, early.id);
    }

    #[test]
    fn test_power_tones() {
        let snapshots = vec![
            snap("A", date(1, 1), 12.0, 0),
            snap("A", date(1, 2), 14.0, 0),
            snap("A", date(1, 4), 13.0, 0),
            snap("A", date(1, 5), 13.0, 0),
            snap("A", date(1, 6), 9.0, 0),
        ];
        let matrix = build_progress_matrix(
            &snapshots,
            &date_axis(date(1, 1), date(1, 6)),
            ProgressMode::Power,
        );

        let tones: Vec<Option<PowerTone>> = matrix.rows[0]
            .cells
            .iter()
            .map(|c| match c {
                Some(ProgressCell::Power { power_tone, .. }) => Some(*power_tone),
                _ => None,
            })
            .collect();
        assert_eq!(
            tones,
            vec![
                Some(PowerTone::Flat),
                Some(PowerTone::Up),
                None,
                Some(PowerTone::Down),
                Some(PowerTone::Flat),
                Some(PowerTone::Low),
            ]
        );
    }

    #[test]
    fn test_power_mode_sorts_by_end_power() {
        let snapshots = vec![
            snap("small", date(1, 1), 50.0, 0),
            snap("small", date(1, 2), 11.0, 0),
            snap("big", date(1, 2), 30.0, 0),
        ];
        let matrix = build_progress_matrix(
            &snapshots,
            &date_axis(date(1, 1), date(1, 2)),
            ProgressMode::Power,
        );
        let names: Vec<&str> = matrix.rows.iter().map(|r| r.entry.name.as_str()).collect();
        assert_eq!(names, vec!["big", "small"]);
        assert!(matrix.rows[0].duel_ratio.is_none());
    }

    #[test]
    fn test_duel_mode_tones_and_ratio() {
        let snapshots = vec![
            snap("A", date(1, 1), 12.0, 0),
            snap("A", date(1, 2), 12.0, 7_200_000),
            snap("A", date(1, 3), 12.0, 7_200_001),
            snap("B", date(1, 1), 12.0, 50_000_000),
        ];
        let matrix = build_progress_matrix(
            &snapshots,
            &date_axis(date(1, 1), date(1, 3)),
            ProgressMode::Duel,
        );

        assert_eq!(matrix.rows[0].entry.name, "B");
        assert_eq!(matrix.rows[0].duel_ratio, Some(1.0));

        let a = &matrix.rows[1];
        let tones: Vec<DuelTone> = a
            .cells
            .iter()
            .filter_map(|c| match c {
                Some(ProgressCell::Duel { tone, .. }) => Some(*tone),
                _ => None,
            })
            .collect();
        assert_eq!(tones, vec![DuelTone::Idle, DuelTone::Partial, DuelTone::Full]);

        let expected = 14_400_001.0 / (3.0 * 7_200_000.0);
        assert!((a.duel_ratio.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_totals_include_dates_past_capped_axis() {
        let snapshots = vec![snap("A", date(1, 1), 5.0, 1), snap("A", date(3, 1), 50.0, 2)];
        let matrix = build_progress_matrix(
            &snapshots,
            &date_axis(date(1, 1), date(3, 1)),
            ProgressMode::Power,
        );

        assert_eq!(matrix.dates.len(), MAX_AXIS_LEN);
        let row = &matrix.rows[0];
        assert_eq!(row.entry.end_power, 50.0);
        assert_eq!(row.entry.total_growth, 45.0);
        assert_eq!(row.entry.total_duel_score, 3);
        assert_eq!(row.cells.len(), MAX_AXIS_LEN);
        assert_eq!(row.cells.iter().filter(|c| c.is_some()).count(), 1);
    }
}
