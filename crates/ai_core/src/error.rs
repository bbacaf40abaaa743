//! Transport errors

use thiserror::Error;

/// Errors raised while talking to an Ollama-compatible server
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Could not reach the server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or completed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server does not know the requested model
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded the client timeout
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Server answered with a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Streamed body broke off
    #[error("Stream error: {0}")]
    StreamError(String),
}

impl InferenceError {
    /// Classify a reqwest failure, reporting timeouts against `timeout_ms`
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Whether the server could not be reached at all
    pub const fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}
