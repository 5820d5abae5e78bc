//! Service context - dependency container for services
//!
//! Holds the store ports, the optional name recognizer and the built-in
//! alliance branding.

use std::sync::Arc;

use roster_core::entities::AllianceConfig;
use roster_core::traits::{ConfigRepository, NameRecognizer, SnapshotRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    snapshot_repo: Arc<dyn SnapshotRepository>,
    config_repo: Arc<dyn ConfigRepository>,
    recognizer: Option<Arc<dyn NameRecognizer>>,
    alliance_defaults: AllianceConfig,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the snapshot repository
    pub fn snapshot_repo(&self) -> &dyn SnapshotRepository {
        self.snapshot_repo.as_ref()
    }

    /// Get the config repository
    pub fn config_repo(&self) -> &dyn ConfigRepository {
        self.config_repo.as_ref()
    }

    // === Adapters ===

    /// Name recognizer, when one is configured
    pub fn recognizer(&self) -> Option<&dyn NameRecognizer> {
        self.recognizer.as_deref()
    }

    /// Branding used for fields the stored config does not set
    pub fn alliance_defaults(&self) -> &AllianceConfig {
        &self.alliance_defaults
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("recognizer", &self.recognizer.is_some())
            .field("alliance_defaults", &self.alliance_defaults)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    snapshot_repo: Option<Arc<dyn SnapshotRepository>>,
    config_repo: Option<Arc<dyn ConfigRepository>>,
    recognizer: Option<Arc<dyn NameRecognizer>>,
    alliance_defaults: Option<AllianceConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot_repo(mut self, repo: Arc<dyn SnapshotRepository>) -> Self {
        self.snapshot_repo = Some(repo);
        self
    }

    pub fn config_repo(mut self, repo: Arc<dyn ConfigRepository>) -> Self {
        self.config_repo = Some(repo);
        self
    }

    pub fn recognizer(mut self, recognizer: Arc<dyn NameRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn alliance_defaults(mut self, defaults: AllianceConfig) -> Self {
        self.alliance_defaults = Some(defaults);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            snapshot_repo: self
                .snapshot_repo
                .ok_or_else(|| ServiceError::validation("snapshot_repo is required"))?,
            config_repo: self
                .config_repo
                .ok_or_else(|| ServiceError::validation("config_repo is required"))?,
            recognizer: self.recognizer,
            alliance_defaults: self.alliance_defaults.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use roster_core::MemberSnapshot;
    use roster_db::{InMemoryConfigStore, InMemorySnapshotStore};

    use super::ServiceContext;

    /// Context over fresh in-memory stores; the snapshot store is returned for assertions
    pub fn memory_context(snapshots: Vec<MemberSnapshot>) -> (ServiceContext, Arc<InMemorySnapshotStore>) {
        let store = Arc::new(InMemorySnapshotStore::with_snapshots(snapshots));
        let ctx = ServiceContext::builder()
            .snapshot_repo(store.clone())
            .config_repo(Arc::new(InMemoryConfigStore::new()))
            .build()
            .unwrap();
        (ctx, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_repositories() {
        let err = ServiceContext::builder().build().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_defaults_and_no_recognizer() {
        let (ctx, _) = test_support::memory_context(Vec::new());
        assert!(ctx.recognizer().is_none());
        assert_eq!(ctx.alliance_defaults(), &AllianceConfig::default());
    }
}
