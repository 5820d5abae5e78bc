//! Snapshot service
//!
//! Single-record reads and writes for the member form.

use roster_core::{MemberSnapshot, SnapshotDate, SnapshotId};
use tracing::{info, instrument, warn};

use crate::dto::requests::SnapshotFields;
use crate::dto::{SaveSnapshotRequest, SnapshotResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Snapshot service
pub struct SnapshotService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SnapshotService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every snapshot of one day, in store order.
    ///
    /// A failed fetch is logged and yields an empty day.
    #[instrument(skip(self))]
    pub async fn load_day(&self, date: SnapshotDate) -> Vec<MemberSnapshot> {
        match self.ctx.snapshot_repo().find_by_date(date).await {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!(%date, error = %e, "Failed to fetch snapshots");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_day(&self, date: SnapshotDate) -> Vec<SnapshotResponse> {
        self.load_day(date).await.iter().map(SnapshotResponse::from).collect()
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &SnapshotId) -> ServiceResult<SnapshotResponse> {
        let snapshot = self
            .ctx
            .snapshot_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Snapshot", id.to_string()))?;

        Ok(SnapshotResponse::from(&snapshot))
    }

    /// Create a snapshot under a freshly minted ID
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: SaveSnapshotRequest) -> ServiceResult<SnapshotResponse> {
        let fields = request.parse()?;
        let mut snapshot = MemberSnapshot::new(fields.date, fields.name.clone());
        fill(&mut snapshot, fields);

        self.ctx.snapshot_repo().put(&snapshot).await?;

        info!(id = %snapshot.id, date = %snapshot.date, "Snapshot created");

        Ok(SnapshotResponse::from(&snapshot))
    }

    /// Overwrite an existing snapshot, keeping its ID and date
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: &SnapshotId,
        request: SaveSnapshotRequest,
    ) -> ServiceResult<SnapshotResponse> {
        let fields = request.parse()?;
        let mut snapshot = self
            .ctx
            .snapshot_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Snapshot", id.to_string()))?;

        fill(&mut snapshot, fields);
        snapshot.touch();

        self.ctx.snapshot_repo().put(&snapshot).await?;

        info!(id = %snapshot.id, date = %snapshot.date, "Snapshot updated");

        Ok(SnapshotResponse::from(&snapshot))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &SnapshotId) -> ServiceResult<()> {
        if !self.ctx.snapshot_repo().delete(id).await? {
            return Err(ServiceError::not_found("Snapshot", id.to_string()));
        }

        info!(id = %id, "Snapshot deleted");
        Ok(())
    }
}

/// Copy the form fields; the date stays with the ID it was minted under
fn fill(snapshot: &mut MemberSnapshot, fields: SnapshotFields) {
    snapshot.name = fields.name;
    snapshot.name_image = fields.name_image;
    snapshot.power = fields.power;
    snapshot.level = fields.level;
    snapshot.rank = fields.rank;
    snapshot.team1_power = fields.team1_power;
    snapshot.duel_score = fields.duel_score;
}
