//! Member snapshot entity - one member's stats on one calendar day

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::thresholds::{
    CRITICAL_DUEL, DEFAULT_LEVEL, DUEL_DISPLAY_DIVISOR, LOW_DUEL, LOW_LEVEL, LOW_POWER,
    LOW_TEAM_POWER,
};
use super::{Rank, SnapshotPatch};
use crate::value_objects::{SnapshotDate, SnapshotId};

/// Visual alert level for a duel score; critical wins over low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelAlert {
    None,
    Low,
    Critical,
}

/// Member snapshot entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: SnapshotId,
    pub date: SnapshotDate,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_image: Option<String>,
    /// Millions
    pub power: f64,
    pub level: u8,
    pub rank: Rank,
    /// Millions
    pub team1_power: f64,
    /// Raw units
    #[serde(default)]
    pub duel_score: u64,
    /// Epoch millis of the last write
    #[serde(default)]
    pub updated_at: i64,
}

impl MemberSnapshot {
    /// Create a snapshot with a freshly minted ID and form defaults
    pub fn new(date: SnapshotDate, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: SnapshotId::mint(date, &name),
            date,
            name,
            name_image: None,
            power: 0.0,
            level: DEFAULT_LEVEL,
            rank: Rank::default(),
            team1_power: 0.0,
            duel_score: 0,
            updated_at: now_millis(),
        }
    }

    #[inline]
    pub fn is_low_power(&self) -> bool {
        self.power < LOW_POWER
    }

    #[inline]
    pub fn is_low_level(&self) -> bool {
        self.level < LOW_LEVEL
    }

    #[inline]
    pub fn is_low_team_power(&self) -> bool {
        self.team1_power < LOW_TEAM_POWER
    }

    /// Any of the three health flags
    pub fn is_at_risk(&self) -> bool {
        self.is_low_power() || self.is_low_level() || self.is_low_team_power()
    }

    #[inline]
    pub fn is_low_duel(&self) -> bool {
        self.duel_score < LOW_DUEL
    }

    #[inline]
    pub fn is_critical_duel(&self) -> bool {
        self.duel_score < CRITICAL_DUEL
    }

    pub fn duel_alert(&self) -> DuelAlert {
        if self.is_critical_duel() {
            DuelAlert::Critical
        } else if self.is_low_duel() {
            DuelAlert::Low
        } else {
            DuelAlert::None
        }
    }

    /// Duel score in display units
    pub fn duel_score_millions(&self) -> f64 {
        self.duel_score as f64 / DUEL_DISPLAY_DIVISOR
    }

    /// Name shown in listings; image-only members have an empty name
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    /// Key used to detect duplicates within one day
    pub fn dedupe_key(&self) -> String {
        self.name.to_lowercase().trim().to_string()
    }

    /// Clone this snapshot onto another date under a fresh ID.
    ///
    /// The duel score is carried only when `keep_duel_score` is set.
    pub fn copy_to(&self, date: SnapshotDate, keep_duel_score: bool) -> Self {
        Self {
            id: SnapshotId::mint(date, &self.name),
            date,
            duel_score: if keep_duel_score { self.duel_score } else { 0 },
            updated_at: now_millis(),
            ..self.clone()
        }
    }

    /// Apply the set fields of a patch
    pub fn apply(&mut self, patch: &SnapshotPatch) {
        if let Some(power) = patch.power {
            self.power = power;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(rank) = patch.rank {
            self.rank = rank;
        }
        if let Some(team1_power) = patch.team1_power {
            self.team1_power = team1_power;
        }
        if let Some(duel_score) = patch.duel_score {
            self.duel_score = duel_score;
        }
    }

    /// Stamp the write time
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
