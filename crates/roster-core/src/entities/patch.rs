//! Sparse field updates applied identically to many snapshots

use serde::{Deserialize, Serialize};

use super::Rank;

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPatch {
    pub power: Option<f64>,
    pub level: Option<u8>,
    pub rank: Option<Rank>,
    pub team1_power: Option<f64>,
    pub duel_score: Option<u64>,
}

impl SnapshotPatch {
    /// Patch that zeroes the duel score
    pub fn reset_duel() -> Self {
        Self {
            duel_score: Some(0),
            ..Self::default()
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.power.is_none()
            && self.level.is_none()
            && self.rank.is_none()
            && self.team1_power.is_none()
            && self.duel_score.is_none()
    }
}
