//! HTTP image resolver - Loads images for the Ollama `images` field
//!
//! Ollama wants bare base64 payloads. Inline bytes are encoded directly,
//! `data:` URIs are decoded and re-encoded, `http(s)` URLs are downloaded.

use std::time::Duration;

use application::{ApplicationError, ImageResolverPort};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use domain::ImageSource;
use reqwest::Client;
use tracing::{debug, instrument, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolves images over HTTP
#[derive(Debug, Clone)]
pub struct HttpImageResolver {
    client: Client,
}

impl HttpImageResolver {
    /// Create a resolver with the default download timeout
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a resolver with a custom download timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ApplicationError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("Image download failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, url, "Image download failed");
            return Err(ApplicationError::ExternalService(format!(
                "Image download failed: Status {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("Image download failed: {e}")))?;
        debug!(url, size = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }
}

/// Decode the payload of a `data:` URI
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ApplicationError> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| ApplicationError::InvalidInput("Malformed data URI".to_string()))?;

    if header.ends_with(";base64") {
        STANDARD
            .decode(payload)
            .map_err(|e| ApplicationError::InvalidInput(format!("Invalid base64 in data URI: {e}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[async_trait]
impl ImageResolverPort for HttpImageResolver {
    #[instrument(skip_all)]
    async fn resolve(&self, image: &ImageSource) -> Result<String, ApplicationError> {
        let bytes = match image {
            ImageSource::Data(bytes) => bytes.clone(),
            ImageSource::Url(url) if url.starts_with("data:") => decode_data_uri(url)?,
            ImageSource::Url(url) if url.starts_with("http://") || url.starts_with("https://") => {
                self.download(url).await?
            },
            ImageSource::Url(url) => {
                return Err(ApplicationError::InvalidInput(format!(
                    "Unsupported image URL: {url}"
                )));
            },
        };
        Ok(STANDARD.encode(bytes))
    }
}
