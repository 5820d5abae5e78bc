//! Inline image payloads (data URLs) used for name images and logos

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::DomainError;

/// Decoded view of a `data:<mime>;base64,<payload>` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    /// Base64 payload, still encoded
    pub data: String,
}

impl ImageData {
    /// Split a data URL into MIME type and payload, checking the payload is valid base64
    pub fn from_data_url(url: &str) -> Result<Self, DomainError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| DomainError::InvalidImage("not a data URL".to_string()))?;
        let (meta, data) = rest
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidImage("missing payload".to_string()))?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| DomainError::InvalidImage("payload is not base64".to_string()))?;

        if mime_type.is_empty() || data.is_empty() {
            return Err(DomainError::InvalidImage("empty MIME type or payload".to_string()));
        }

        STANDARD
            .decode(data)
            .map_err(|e| DomainError::InvalidImage(e.to_string()))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    /// Rebuild the data URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
