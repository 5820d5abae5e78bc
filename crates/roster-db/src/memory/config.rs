//! In-memory implementation of ConfigRepository

use async_trait::async_trait;
use parking_lot::RwLock;

use roster_core::entities::{AllianceConfig, AllianceConfigPatch};
use roster_core::traits::{ConfigRepository, RepoResult};

/// Singleton config held in memory; `None` until first written
#[derive(Default)]
pub struct InMemoryConfigStore {
    config: RwLock<Option<AllianceConfig>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigStore {
    async fn load(&self) -> RepoResult<Option<AllianceConfig>> {
        Ok(self.config.read().clone())
    }

    async fn merge(&self, patch: &AllianceConfigPatch) -> RepoResult<()> {
        let mut guard = self.config.write();
        let stored = guard.get_or_insert_with(|| AllianceConfig {
            logo: None,
            alliance_name: None,
        });
        stored.merge(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_merge_creates_then_updates() {
        let store = InMemoryConfigStore::new();
        assert!(store.load().await.unwrap().is_none());

        store.merge(&AllianceConfigPatch::logo("data:image/png;base64,AAAA")).await.unwrap();
        let config = store.load().await.unwrap().unwrap();
        assert_eq!(config.logo.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(config.alliance_name.is_none());

        store
            .merge(&AllianceConfigPatch {
                logo: None,
                alliance_name: Some("Night Watch".to_string()),
            })
            .await
            .unwrap();
        let config = store.load().await.unwrap().unwrap();
        assert_eq!(config.logo.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(config.alliance_name.as_deref(), Some("Night Watch"));
    }
}
