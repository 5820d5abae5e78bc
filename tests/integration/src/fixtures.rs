//! Test fixtures and data generators

use serde::{Deserialize, Serialize};

/// Body of `POST /snapshots` and `PUT /snapshots/:id`
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotForm {
    pub date: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_image: Option<String>,
    pub power: String,
    pub level: u8,
    pub rank: String,
    pub team1_power: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duel_score: Option<String>,
}

impl SnapshotForm {
    /// A healthy R1 member
    pub fn new(date: &str, name: &str) -> Self {
        Self {
            date: date.to_string(),
            name: name.to_string(),
            name_image: None,
            power: "15".to_string(),
            level: 25,
            rank: "R1".to_string(),
            team1_power: "5".to_string(),
            duel_score: None,
        }
    }

    pub fn power(mut self, power: &str) -> Self {
        self.power = power.to_string();
        self
    }

    pub fn rank(mut self, rank: &str) -> Self {
        self.rank = rank.to_string();
        self
    }

    pub fn duel(mut self, duel_score: &str) -> Self {
        self.duel_score = Some(duel_score.to_string());
        self
    }
}

/// Subset of the snapshot response the tests look at
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub date: String,
    pub name: String,
    pub power: f64,
    pub rank: String,
    pub duel_score: u64,
    pub low_power: bool,
    pub duel_alert: String,
}

#[derive(Debug, Deserialize)]
pub struct Affected {
    pub affected: u64,
}

/// Error body `{"error": {...}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
