//! PostgreSQL implementation of SnapshotRepository
//!
//! Listings are ordered by `(updated_at, id)` so first-seen-wins logic is
//! reproducible. Batches run inside a single transaction.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use roster_core::entities::{MemberSnapshot, Rank, SnapshotPatch};
use roster_core::traits::{RepoResult, SnapshotRepository};
use roster_core::value_objects::{SnapshotDate, SnapshotId};

use crate::mappers::{to_entities, SnapshotInsert};
use crate::models::SnapshotModel;

use super::error::{map_db_error, snapshot_not_found};

/// PostgreSQL implementation of SnapshotRepository
#[derive(Clone)]
pub struct PgSnapshotRepository {
    pool: PgPool,
}

impl PgSnapshotRepository {
    /// Create a new PgSnapshotRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert(tx: &mut Transaction<'_, Postgres>, snapshot: &MemberSnapshot) -> RepoResult<()> {
        let row = SnapshotInsert::new(snapshot);

        sqlx::query(
            r#"
            INSERT INTO alliance_members
                (id, date, name, name_image, power, level, rank, team1_power, duel_score, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                date = EXCLUDED.date,
                name = EXCLUDED.name,
                name_image = EXCLUDED.name_image,
                power = EXCLUDED.power,
                level = EXCLUDED.level,
                rank = EXCLUDED.rank,
                team1_power = EXCLUDED.team1_power,
                duel_score = EXCLUDED.duel_score,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(row.date)
        .bind(row.name)
        .bind(row.name_image)
        .bind(row.power)
        .bind(row.level)
        .bind(row.rank)
        .bind(row.team1_power)
        .bind(row.duel_score)
        .bind(row.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

fn raw_ids(ids: &[SnapshotId]) -> Vec<String> {
    ids.iter().map(|id| id.as_str().to_string()).collect()
}

fn opt_i16(value: Option<u8>) -> Option<i16> {
    value.map(i16::from)
}

fn opt_i64(value: Option<u64>) -> Option<i64> {
    value.map(|v| i64::try_from(v).unwrap_or(i64::MAX))
}

#[async_trait]
impl SnapshotRepository for PgSnapshotRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &SnapshotId) -> RepoResult<Option<MemberSnapshot>> {
        let result = sqlx::query_as::<_, SnapshotModel>(
            r#"
            SELECT id, date, name, name_image, power, level, rank, team1_power, duel_score, updated_at
            FROM alliance_members
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(MemberSnapshot::try_from).transpose()
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[SnapshotId]) -> RepoResult<Vec<MemberSnapshot>> {
        let results = sqlx::query_as::<_, SnapshotModel>(
            r#"
            SELECT id, date, name, name_image, power, level, rank, team1_power, duel_score, updated_at
            FROM alliance_members
            WHERE id = ANY($1)
            ORDER BY updated_at, id
            "#,
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        to_entities(results)
    }

    #[instrument(skip(self))]
    async fn find_by_date(&self, date: SnapshotDate) -> RepoResult<Vec<MemberSnapshot>> {
        let results = sqlx::query_as::<_, SnapshotModel>(
            r#"
            SELECT id, date, name, name_image, power, level, rank, team1_power, duel_score, updated_at
            FROM alliance_members
            WHERE date = $1
            ORDER BY updated_at, id
            "#,
        )
        .bind(date.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        to_entities(results)
    }

    #[instrument(skip(self))]
    async fn find_by_date_range(
        &self,
        start: SnapshotDate,
        end: SnapshotDate,
    ) -> RepoResult<Vec<MemberSnapshot>> {
        let results = sqlx::query_as::<_, SnapshotModel>(
            r#"
            SELECT id, date, name, name_image, power, level, rank, team1_power, duel_score, updated_at
            FROM alliance_members
            WHERE date BETWEEN $1 AND $2
            ORDER BY updated_at, id
            "#,
        )
        .bind(start.into_inner())
        .bind(end.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        to_entities(results)
    }

    #[instrument(skip(self), fields(count = dates.len()))]
    async fn find_by_dates(&self, dates: &[SnapshotDate]) -> RepoResult<Vec<MemberSnapshot>> {
        let raw: Vec<NaiveDate> = dates.iter().map(|d| d.into_inner()).collect();

        let results = sqlx::query_as::<_, SnapshotModel>(
            r#"
            SELECT id, date, name, name_image, power, level, rank, team1_power, duel_score, updated_at
            FROM alliance_members
            WHERE date = ANY($1)
            ORDER BY updated_at, id
            "#,
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        to_entities(results)
    }

    #[instrument(skip(self, snapshot), fields(id = %snapshot.id))]
    async fn put(&self, snapshot: &MemberSnapshot) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        Self::upsert(&mut tx, snapshot).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &SnapshotId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM alliance_members WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, snapshots), fields(count = snapshots.len()))]
    async fn batch_put(&self, snapshots: &[MemberSnapshot]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for snapshot in snapshots {
            Self::upsert(&mut tx, snapshot).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn batch_update(&self, ids: &[SnapshotId], patch: &SnapshotPatch) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let now = Utc::now().timestamp_millis();

        for id in ids {
            let result = sqlx::query(
                r#"
                UPDATE alliance_members
                SET power = COALESCE($2, power),
                    level = COALESCE($3, level),
                    rank = COALESCE($4, rank),
                    team1_power = COALESCE($5, team1_power),
                    duel_score = COALESCE($6, duel_score),
                    updated_at = $7
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .bind(patch.power)
            .bind(opt_i16(patch.level))
            .bind(patch.rank.map(Rank::as_str))
            .bind(patch.team1_power)
            .bind(opt_i64(patch.duel_score))
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            // Dropping the transaction rolls back the rows already touched
            if result.rows_affected() == 0 {
                return Err(snapshot_not_found(id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(ids.len() as u64)
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn batch_delete(&self, ids: &[SnapshotId]) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for id in ids {
            let result = sqlx::query("DELETE FROM alliance_members WHERE id = $1")
                .bind(id.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                return Err(snapshot_not_found(id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(ids.len() as u64)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
