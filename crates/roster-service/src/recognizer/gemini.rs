//! Gemini recognizer - reads a player name off a screenshot with a
//! multimodal `generateContent` call.
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-3-flash-preview")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let recognizer = GeminiRecognizer::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};

use roster_common::RecognitionConfig;
use roster_core::{DomainError, ImageData, NameRecognizer};

const PROMPT: &str =
    "Extract ONLY the player name from this game screenshot. Return just the name string.";

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini recognizer
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: SecretString,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_key(SecretString::from(api_key.into()))
    }

    fn with_key(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from app settings; `None` when no API key is configured
    pub fn from_settings(settings: &RecognitionConfig) -> Option<Self> {
        let api_key = settings.api_key.clone()?;
        Some(
            Self::with_key(api_key)
                .with_model(settings.model.clone())
                .with_base_url(settings.base_url.clone())
                .with_timeout(Duration::from_secs(settings.timeout_secs)),
        )
    }
}

/// Gemini-backed [`NameRecognizer`]
pub struct GeminiRecognizer {
    config: GeminiConfig,
    client: Client,
}

impl GeminiRecognizer {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to a default HTTP client");
                Client::new()
            });

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl std::fmt::Debug for GeminiRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiRecognizer")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[async_trait]
impl NameRecognizer for GeminiRecognizer {
    #[instrument(skip(self, image), fields(model = %self.config.model))]
    async fn recognize(&self, image: &ImageData) -> Result<Option<String>, DomainError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&GenerateRequest::for_image(image))
            .send()
            .await
            .map_err(|e| DomainError::RecognitionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::RecognitionError(format!(
                "upstream returned {status}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::RecognitionError(e.to_string()))?;

        Ok(body.text())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Image {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn for_image(image: &'a ImageData) -> Self {
        Self {
            contents: [Content {
                parts: [
                    RequestPart::Image {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: &image.data,
                        },
                    },
                    RequestPart::Text { text: PROMPT },
                ],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, trimmed; `None` if blank
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
