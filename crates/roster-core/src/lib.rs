//! # roster-core
//!
//! Domain layer containing the member snapshot model, risk thresholds, the
//! aggregation engine (daily views, weekly duel rollup, progress matrices),
//! and the store traits the infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod aggregation;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregation::{
    build_progress_matrix, date_axis, filter_and_sort, fold_progress, group_by_rank, week_dates,
    week_window, weekly_rollup, DailyFilter, DailyStats, DataPoint, DuelTone, LevelTone,
    PowerTone, ProgressCell, ProgressEntry, ProgressMatrix, ProgressMode, ProgressRow, RankGroup,
    SortKey, WeeklyScore, MAX_AXIS_LEN,
};
pub use entities::{
    thresholds, AllianceConfig, AllianceConfigPatch, DuelAlert, MemberSnapshot, Rank,
    RankParseError, SnapshotPatch, DEFAULT_ALLIANCE_NAME, DEFAULT_LOGO_URL,
};
pub use error::DomainError;
pub use traits::{ConfigRepository, NameRecognizer, RepoResult, SnapshotRepository};
pub use value_objects::{
    sanitize_name, ImageData, SnapshotDate, SnapshotDateParseError, SnapshotId, DATE_FORMAT,
};
