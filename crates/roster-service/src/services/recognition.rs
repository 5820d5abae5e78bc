//! Name recognition service
//!
//! Best-effort assist for the snapshot form. Nothing here ever fails the
//! request: a missing recognizer, a bad image or an upstream error all
//! come back as "no name".

use roster_core::ImageData;
use tracing::{debug, instrument};

use crate::dto::RecognizeNameResponse;

use super::context::ServiceContext;

/// Name recognition service
pub struct RecognitionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecognitionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, data_url))]
    pub async fn recognize(&self, data_url: &str) -> RecognizeNameResponse {
        RecognizeNameResponse {
            name: self.try_recognize(data_url).await,
        }
    }

    async fn try_recognize(&self, data_url: &str) -> Option<String> {
        let Some(recognizer) = self.ctx.recognizer() else {
            debug!("Name recognition is not configured");
            return None;
        };

        let image = ImageData::from_data_url(data_url)
            .inspect_err(|e| debug!(error = %e, "Unreadable name image"))
            .ok()?;

        match recognizer.recognize(&image).await {
            Ok(name) => name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            Err(e) => {
                debug!(error = %e, "Name recognition failed");
                None
            }
        }
    }
}
