//! Domain to DTO mappers
//!
//! Implements `From` conversions from domain values to response DTOs.

use roster_core::{AllianceConfig, DailyStats, MemberSnapshot, RankGroup, WeeklyScore};

use super::responses::{
    ConfigResponse, RankGroupResponse, SnapshotResponse, StatsResponse, WeeklyScoreResponse,
};

// ============================================================================
// Snapshot Mappers
// ============================================================================

impl From<&MemberSnapshot> for SnapshotResponse {
    fn from(snapshot: &MemberSnapshot) -> Self {
        Self {
            id: snapshot.id.to_string(),
            date: snapshot.date,
            name: snapshot.name.clone(),
            name_image: snapshot.name_image.clone(),
            power: snapshot.power,
            power_label: format!("{:.1}M", snapshot.power),
            level: snapshot.level,
            rank: snapshot.rank,
            team1_power: snapshot.team1_power,
            duel_score: snapshot.duel_score,
            duel_score_millions: snapshot.duel_score_millions(),
            updated_at: snapshot.updated_at,
            low_power: snapshot.is_low_power(),
            low_level: snapshot.is_low_level(),
            at_risk: snapshot.is_at_risk(),
            duel_alert: snapshot.duel_alert(),
        }
    }
}

impl From<MemberSnapshot> for SnapshotResponse {
    fn from(snapshot: MemberSnapshot) -> Self {
        Self::from(&snapshot)
    }
}

// ============================================================================
// View Mappers
// ============================================================================

impl From<RankGroup> for RankGroupResponse {
    fn from(group: RankGroup) -> Self {
        Self {
            rank: group.rank,
            count: group.members.len(),
            members: group.members.iter().map(SnapshotResponse::from).collect(),
        }
    }
}

impl From<DailyStats> for StatsResponse {
    fn from(stats: DailyStats) -> Self {
        Self {
            total: stats.total,
            low_power: stats.low_power,
            low_level: stats.low_level,
            at_risk: stats.at_risk,
            low_duel: stats.low_duel,
            critical_duel: stats.critical_duel,
        }
    }
}

impl WeeklyScoreResponse {
    /// `position` is 1-based
    pub fn ranked(position: usize, score: WeeklyScore) -> Self {
        Self {
            position,
            participation: score.participation(),
            total_millions: score.total_millions(),
            name: score.name,
            total_score: score.total_score,
            yesterday_score: score.yesterday_score,
            days_count: score.days_count,
            level: score.level,
            rank: score.rank,
            last_date: score.last_date,
        }
    }
}

// ============================================================================
// Config Mappers
// ============================================================================

impl From<AllianceConfig> for ConfigResponse {
    fn from(config: AllianceConfig) -> Self {
        Self {
            logo: config.logo,
            alliance_name: config.alliance_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{DuelAlert, SnapshotDate};

    #[test]
    fn test_snapshot_flags() {
        let mut snapshot = MemberSnapshot::new(SnapshotDate::from_ymd(2024, 5, 6).unwrap(), "Anna");
        snapshot.power = 8.0;
        snapshot.team1_power = 4.0;
        snapshot.duel_score = 1_500_000;

        let response = SnapshotResponse::from(&snapshot);
        assert!(response.low_power);
        assert!(response.at_risk);
        assert!(!response.low_level);
        assert_eq!(response.duel_alert, DuelAlert::Low);
        assert_eq!(response.duel_score_millions, 1.5);
        assert_eq!(response.power_label, "8.0M");
    }

    #[test]
    fn test_weekly_position_and_participation() {
        let score = WeeklyScore {
            name: "Anna".to_string(),
            total_score: 3_000_000,
            yesterday_score: 1_000_000,
            days_count: 3,
            level: 25,
            rank: roster_core::Rank::R2,
            last_date: SnapshotDate::from_ymd(2024, 5, 8).unwrap(),
        };

        let response = WeeklyScoreResponse::ranked(1, score);
        assert_eq!(response.position, 1);
        assert_eq!(response.participation, "3/7");
        assert_eq!(response.total_millions, 3.0);
    }
}
