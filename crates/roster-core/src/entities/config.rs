//! Alliance configuration - display settings shared by the whole roster

use serde::{Deserialize, Serialize};

/// Built-in alliance name used when nothing is stored
pub const DEFAULT_ALLIANCE_NAME: &str = "[VEBA] ATAMBİR";

/// Built-in logo used when nothing is stored
pub const DEFAULT_LOGO_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/items/ultra-ball.png";

/// Singleton alliance settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceConfig {
    pub logo: Option<String>,
    pub alliance_name: Option<String>,
}

impl Default for AllianceConfig {
    fn default() -> Self {
        Self {
            logo: Some(DEFAULT_LOGO_URL.to_string()),
            alliance_name: Some(DEFAULT_ALLIANCE_NAME.to_string()),
        }
    }
}

impl AllianceConfig {
    /// Fill unset fields from `fallback`
    pub fn or(self, fallback: &AllianceConfig) -> Self {
        Self {
            logo: self.logo.or_else(|| fallback.logo.clone()),
            alliance_name: self.alliance_name.or_else(|| fallback.alliance_name.clone()),
        }
    }

    /// Overlay the set fields of a patch
    pub fn merge(&mut self, patch: &AllianceConfigPatch) {
        if let Some(logo) = &patch.logo {
            self.logo = Some(logo.clone());
        }
        if let Some(name) = &patch.alliance_name {
            self.alliance_name = Some(name.clone());
        }
    }
}

/// Partial config write; unset fields are left as stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceConfigPatch {
    pub logo: Option<String>,
    pub alliance_name: Option<String>,
}

impl AllianceConfigPatch {
    pub fn logo(logo: impl Into<String>) -> Self {
        Self {
            logo: Some(logo.into()),
            alliance_name: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.logo.is_none() && self.alliance_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_touches_set_fields() {
        let mut config = AllianceConfig::default();
        config.merge(&AllianceConfigPatch::logo("data:image/png;base64,AAAA"));

        assert_eq!(config.logo.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(config.alliance_name.as_deref(), Some(DEFAULT_ALLIANCE_NAME));
    }

    #[test]
    fn test_or_fills_missing() {
        let stored = AllianceConfig {
            logo: None,
            alliance_name: Some("Other".to_string()),
        };
        let merged = stored.or(&AllianceConfig::default());
        assert_eq!(merged.logo.as_deref(), Some(DEFAULT_LOGO_URL));
        assert_eq!(merged.alliance_name.as_deref(), Some("Other"));
    }
}
