//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use roster_core::{DailyFilter, DuelAlert, ProgressMatrix, Rank, SnapshotDate};

// ============================================================================
// Snapshot Responses
// ============================================================================

/// A member snapshot with its derived risk flags
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    pub id: String,
    pub date: SnapshotDate,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_image: Option<String>,
    pub power: f64,
    /// e.g. `12.3M`
    pub power_label: String,
    pub level: u8,
    pub rank: Rank,
    pub team1_power: f64,
    pub duel_score: u64,
    pub duel_score_millions: f64,
    pub updated_at: i64,
    pub low_power: bool,
    pub low_level: bool,
    pub at_risk: bool,
    pub duel_alert: DuelAlert,
}

// ============================================================================
// Daily View Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RankGroupResponse {
    pub rank: Rank,
    pub count: usize,
    pub members: Vec<SnapshotResponse>,
}

/// Stat tiles, always over the unfiltered day
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsResponse {
    pub total: usize,
    pub low_power: usize,
    pub low_level: usize,
    pub at_risk: usize,
    pub low_duel: usize,
    pub critical_duel: usize,
}

/// Roster view: filtered members grouped R3, R2, R1
#[derive(Debug, Clone, Serialize)]
pub struct RosterResponse {
    pub date: SnapshotDate,
    pub filter: DailyFilter,
    pub stats: StatsResponse,
    pub groups: Vec<RankGroupResponse>,
}

/// Flat ranking, power or duel score descending
#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub date: SnapshotDate,
    pub filter: DailyFilter,
    pub members: Vec<SnapshotResponse>,
}

// ============================================================================
// Weekly Duel Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyScoreResponse {
    pub position: usize,
    pub name: String,
    pub total_score: u64,
    pub total_millions: f64,
    pub yesterday_score: u64,
    pub days_count: u32,
    pub participation: String,
    pub level: u8,
    pub rank: Rank,
    pub last_date: SnapshotDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyDuelResponse {
    pub week_start: SnapshotDate,
    pub anchor: SnapshotDate,
    pub scores: Vec<WeeklyScoreResponse>,
}

// ============================================================================
// Progress Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub start: SnapshotDate,
    pub end: SnapshotDate,
    /// The requested range was longer than the axis allows
    pub capped: bool,
    #[serde(flatten)]
    pub matrix: ProgressMatrix,
}

// ============================================================================
// Bulk / Config / Recognition Responses
// ============================================================================

/// Number of snapshots a bulk operation touched
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AffectedResponse {
    pub affected: u64,
}

impl AffectedResponse {
    pub fn new(affected: u64) -> Self {
        Self { affected }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub logo: Option<String>,
    pub alliance_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecognizeNameResponse {
    /// `null` when nothing usable was recognized
    pub name: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub recognizer: String,
}

impl ReadinessResponse {
    /// Readiness hinges on the store; the recognizer is reported only
    pub fn ready(store_healthy: bool, recognizer_enabled: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
                recognizer: if recognizer_enabled { "enabled" } else { "disabled" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
