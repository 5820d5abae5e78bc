//! Alliance config service
//!
//! Stored settings are overlaid on the built-in branding.

use roster_core::{AllianceConfig, AllianceConfigPatch, DomainError, ImageData};
use tracing::{info, instrument, warn};

use crate::dto::{ConfigResponse, SetLogoRequest, UpdateConfigRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Alliance config service
pub struct ConfigService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConfigService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Effective config; falls back to defaults when the store is unreadable
    #[instrument(skip(self))]
    pub async fn get(&self) -> ConfigResponse {
        let stored = self.ctx.config_repo().load().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load alliance config");
            None
        });

        ConfigResponse::from(effective(stored, self.ctx.alliance_defaults()))
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, request: UpdateConfigRequest) -> ServiceResult<ConfigResponse> {
        if let Some(logo) = &request.logo {
            check_logo(logo)?;
        }

        let patch = AllianceConfigPatch {
            logo: request.logo,
            alliance_name: request.alliance_name.map(|n| n.trim().to_string()),
        };

        if !patch.is_empty() {
            self.ctx.config_repo().merge(&patch).await?;
            info!("Alliance config updated");
        }

        Ok(self.get().await)
    }

    /// Replace the logo, leaving the name as stored
    #[instrument(skip(self, request))]
    pub async fn set_logo(&self, request: SetLogoRequest) -> ServiceResult<ConfigResponse> {
        check_logo(&request.logo)?;

        self.ctx
            .config_repo()
            .merge(&AllianceConfigPatch::logo(request.logo))
            .await?;
        info!("Alliance logo updated");

        Ok(self.get().await)
    }
}

/// A logo is an inline image or a web URL
fn check_logo(logo: &str) -> Result<(), DomainError> {
    if logo.starts_with("http://") || logo.starts_with("https://") {
        return Ok(());
    }
    ImageData::from_data_url(logo).map(|_| ())
}

/// Stored config overlaid on `defaults`
pub fn effective(stored: Option<AllianceConfig>, defaults: &AllianceConfig) -> AllianceConfig {
    stored.map_or_else(|| defaults.clone(), |c| c.or(defaults))
}
