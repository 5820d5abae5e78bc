//! MemberSnapshot entity <-> model mapper
//!
//! This is the only place a missing duel score becomes `0`.

use roster_core::entities::MemberSnapshot;
use roster_core::error::DomainError;
use roster_core::value_objects::{SnapshotDate, SnapshotId};

use crate::models::SnapshotModel;

impl TryFrom<SnapshotModel> for MemberSnapshot {
    type Error = DomainError;

    fn try_from(model: SnapshotModel) -> Result<Self, Self::Error> {
        let rank = model
            .rank
            .parse()
            .map_err(|_| DomainError::InvalidRank(model.rank.clone()))?;
        let level = u8::try_from(model.level)
            .map_err(|_| DomainError::DatabaseError(format!("stored level {} out of range", model.level)))?;

        Ok(MemberSnapshot {
            id: SnapshotId::new(model.id),
            date: SnapshotDate::new(model.date),
            name: model.name,
            name_image: model.name_image,
            power: model.power,
            level,
            rank,
            team1_power: model.team1_power,
            duel_score: model.duel_score.map_or(0, |s| u64::try_from(s).unwrap_or(0)),
            updated_at: model.updated_at,
        })
    }
}

/// Convert a list of rows, failing on the first malformed one
pub(crate) fn to_entities(models: Vec<SnapshotModel>) -> Result<Vec<MemberSnapshot>, DomainError> {
    models.into_iter().map(MemberSnapshot::try_from).collect()
}

/// Bind values of a snapshot for insertion
pub struct SnapshotInsert<'a> {
    pub id: &'a str,
    pub date: chrono::NaiveDate,
    pub name: &'a str,
    pub name_image: Option<&'a str>,
    pub power: f64,
    pub level: i16,
    pub rank: &'static str,
    pub team1_power: f64,
    pub duel_score: i64,
    pub updated_at: i64,
}

impl<'a> SnapshotInsert<'a> {
    pub fn new(snapshot: &'a MemberSnapshot) -> Self {
        Self {
            id: snapshot.id.as_str(),
            date: snapshot.date.into_inner(),
            name: &snapshot.name,
            name_image: snapshot.name_image.as_deref(),
            power: snapshot.power,
            level: i16::from(snapshot.level),
            rank: snapshot.rank.as_str(),
            team1_power: snapshot.team1_power,
            duel_score: i64::try_from(snapshot.duel_score).unwrap_or(i64::MAX),
            updated_at: snapshot.updated_at,
        }
    }
}
