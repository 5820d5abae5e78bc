//! Alliance settings database model

use sqlx::FromRow;

/// Database model for the alliance_settings table
#[derive(Debug, Clone, FromRow)]
pub struct AllianceConfigModel {
    pub logo: Option<String>,
    pub alliance_name: Option<String>,
}
