//! Member snapshot database model

use chrono::NaiveDate;
use sqlx::FromRow;

/// Database model for the alliance_members table
#[derive(Debug, Clone, FromRow)]
pub struct SnapshotModel {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub name_image: Option<String>,
    pub power: f64,
    pub level: i16,
    pub rank: String,
    pub team1_power: f64,
    /// Older rows were written without a score
    pub duel_score: Option<i64>,
    pub updated_at: i64,
}
