//! Error handling utilities for repositories

use roster_core::error::DomainError;
use roster_core::value_objects::SnapshotId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "snapshot not found" error
pub fn snapshot_not_found(id: &SnapshotId) -> DomainError {
    DomainError::SnapshotNotFound(id.clone())
}
