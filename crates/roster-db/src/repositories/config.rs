//! PostgreSQL implementation of ConfigRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{AllianceConfig, AllianceConfigPatch};
use roster_core::traits::{ConfigRepository, RepoResult};

use crate::models::AllianceConfigModel;

use super::error::map_db_error;

/// Key of the singleton settings row
const GLOBAL_CONFIG_KEY: &str = "global_config";

/// PostgreSQL implementation of ConfigRepository
#[derive(Clone)]
pub struct PgConfigRepository {
    pool: PgPool,
}

impl PgConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigRepository for PgConfigRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> RepoResult<Option<AllianceConfig>> {
        let result = sqlx::query_as::<_, AllianceConfigModel>(
            "SELECT logo, alliance_name FROM alliance_settings WHERE key = $1",
        )
        .bind(GLOBAL_CONFIG_KEY)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AllianceConfig::from))
    }

    #[instrument(skip(self, patch))]
    async fn merge(&self, patch: &AllianceConfigPatch) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO alliance_settings (key, logo, alliance_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET
                logo = COALESCE(EXCLUDED.logo, alliance_settings.logo),
                alliance_name = COALESCE(EXCLUDED.alliance_name, alliance_settings.alliance_name)
            "#,
        )
        .bind(GLOBAL_CONFIG_KEY)
        .bind(patch.logo.as_deref())
        .bind(patch.alliance_name.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
