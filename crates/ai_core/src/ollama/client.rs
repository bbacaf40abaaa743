//! HTTP client for Ollama-compatible servers

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::streaming::{TransportStream, decode_ndjson};
use super::wire::{ListResponse, ListedModel, TransportResponse, WireRequest};
use crate::config::OllamaClientConfig;
use crate::error::InferenceError;

/// Client for the `/api` surface of an Ollama-compatible server
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: OllamaClientConfig,
}

impl OllamaClient {
    /// Create a client for the configured server
    ///
    /// Only connecting is bounded; a generation may run as long as the
    /// server needs.
    pub fn new(config: OllamaClientConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        debug!(base_url = %config.base_url, "Created Ollama client");

        Ok(Self { client, config })
    }

    /// Create a client for `base_url` with default settings
    pub fn for_url(base_url: impl Into<String>) -> Result<Self, InferenceError> {
        Self::new(OllamaClientConfig::for_url(base_url))
    }

    /// Server settings in use
    pub const fn config(&self) -> &OllamaClientConfig {
        &self.config
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn transport_error(err: &reqwest::Error, timeout_ms: u64) -> InferenceError {
        InferenceError::from_transport(err, timeout_ms)
    }

    /// Turn a non-success status into an error, keeping the body for context
    async fn check_status(response: Response, model: &str) -> Result<Response, InferenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Ollama request failed");

        if status == StatusCode::NOT_FOUND {
            return Err(InferenceError::ModelNotAvailable(model.to_string()));
        }
        Err(InferenceError::ServerError(format!("Status {status}: {body}")))
    }

    /// List installed models, bounded by `list_timeout_ms` as a whole
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ListedModel>, InferenceError> {
        let timeout_ms = self.config.list_timeout_ms;
        let response = self
            .client
            .get(self.api_url("tags"))
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| Self::transport_error(&e, timeout_ms))?;
        let response = Self::check_status(response, "").await?;

        let list: ListResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout(timeout_ms)
            } else {
                InferenceError::InvalidResponse(e.to_string())
            }
        })?;

        info!(count = list.models.len(), "Listed server models");
        Ok(list.models)
    }

    /// Non-streaming `/api/generate`
    pub async fn generate(&self, request: &WireRequest) -> Result<TransportResponse, InferenceError> {
        self.complete("generate", request).await
    }

    /// Non-streaming `/api/chat`
    pub async fn chat(&self, request: &WireRequest) -> Result<TransportResponse, InferenceError> {
        self.complete("chat", request).await
    }

    /// Non-streaming call to whichever endpoint accepts `request`
    pub async fn send(&self, request: &WireRequest) -> Result<TransportResponse, InferenceError> {
        self.complete(request.endpoint(), request).await
    }

    /// Streaming `/api/generate`
    pub async fn generate_stream(
        &self,
        request: &WireRequest,
    ) -> Result<TransportStream, InferenceError> {
        self.open_stream("generate", request).await
    }

    /// Streaming `/api/chat`
    pub async fn chat_stream(&self, request: &WireRequest) -> Result<TransportStream, InferenceError> {
        self.open_stream("chat", request).await
    }

    /// Streaming call to whichever endpoint accepts `request`
    pub async fn send_stream(&self, request: &WireRequest) -> Result<TransportStream, InferenceError> {
        self.open_stream(request.endpoint(), request).await
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(
        &self,
        endpoint: &str,
        request: &WireRequest,
    ) -> Result<TransportResponse, InferenceError> {
        debug!(endpoint, "Sending request to Ollama");

        let response = self.post(endpoint, request, false).await?;
        let response: TransportResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        debug!(
            served_by = response.model(),
            done = response.is_done(),
            finish_reason = ?response.finish_reason(),
            "Ollama request completed"
        );
        Ok(response)
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn open_stream(
        &self,
        endpoint: &str,
        request: &WireRequest,
    ) -> Result<TransportStream, InferenceError> {
        debug!(endpoint, "Opening Ollama stream");

        let response = self.post(endpoint, request, true).await?;
        Ok(decode_ndjson(Box::pin(response.bytes_stream())))
    }

    async fn post(
        &self,
        endpoint: &str,
        request: &WireRequest,
        stream: bool,
    ) -> Result<Response, InferenceError> {
        let body = WireRequest {
            stream,
            ..request.clone()
        };

        let response = self
            .client
            .post(self.api_url(endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e, self.config.connect_timeout_ms))?;

        Self::check_status(response, &request.model).await
    }
}
