//! Name recognition port - reads a player name off a screenshot

use async_trait::async_trait;

use crate::error::DomainError;
use crate::value_objects::ImageData;

#[async_trait]
pub trait NameRecognizer: Send + Sync {
    /// Best-effort name; `Ok(None)` when the image holds no readable name
    async fn recognize(&self, image: &ImageData) -> Result<Option<String>, DomainError>;
}
