//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{SnapshotDate, SnapshotId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(SnapshotId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: SnapshotDate, end: SnapshotDate },

    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    #[error("Level {0} is outside 14-30")]
    LevelOutOfRange(u8),

    #[error("Invalid value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("A name or a name image is required")]
    MissingName,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Name recognition failed: {0}")]
    RecognitionError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::SnapshotNotFound(_) => "UNKNOWN_SNAPSHOT",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::InvalidRank(_) => "INVALID_RANK",
            Self::LevelOutOfRange(_) => "LEVEL_OUT_OF_RANGE",
            Self::InvalidNumber { .. } => "INVALID_NUMBER",
            Self::MissingName => "MISSING_NAME",
            Self::InvalidImage(_) => "INVALID_IMAGE",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::RecognitionError(_) => "RECOGNITION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SnapshotNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidDate(_)
                | Self::InvalidDateRange { .. }
                | Self::InvalidRank(_)
                | Self::LevelOutOfRange(_)
                | Self::InvalidNumber { .. }
                | Self::MissingName
                | Self::InvalidImage(_)
        )
    }
}
