//! AllianceConfig entity <-> model mapper

use roster_core::entities::AllianceConfig;

use crate::models::AllianceConfigModel;

impl From<AllianceConfigModel> for AllianceConfig {
    fn from(model: AllianceConfigModel) -> Self {
        AllianceConfig {
            logo: model.logo,
            alliance_name: model.alliance_name,
        }
    }
}
