//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain values to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BulkUpdateRequest, CopySelectionRequest, DayQuery, RangeQuery, RecognizeNameRequest,
    SaveSnapshotRequest, SetLogoRequest, UpdateConfigRequest, ViewQuery,
};

pub use responses::{
    AffectedResponse, ConfigResponse, HealthChecks, HealthResponse, ProgressResponse,
    RankGroupResponse, RankingResponse, ReadinessResponse, RecognizeNameResponse,
    RosterResponse, SnapshotResponse, StatsResponse, WeeklyDuelResponse, WeeklyScoreResponse,
};
