//! Path parameter extractors
//!
//! Type-safe extraction of dates and snapshot IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use roster_core::{SnapshotDate, SnapshotId};

use crate::response::ApiError;

/// `:date` parsed as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy)]
pub struct DatePath(pub SnapshotDate);

#[async_trait]
impl<S> FromRequestParts<S> for DatePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        SnapshotDate::parse(&raw)
            .map(DatePath)
            .map_err(|_| ApiError::invalid_path(format!("Invalid date: {raw}")))
    }
}

/// `:id` of a snapshot
#[derive(Debug, Clone)]
pub struct IdPath(pub SnapshotId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        if raw.trim().is_empty() {
            return Err(ApiError::invalid_path("Snapshot id must not be empty"));
        }
        Ok(IdPath(SnapshotId::new(raw)))
    }
}
