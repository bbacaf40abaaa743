//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Backing service cannot be reached; the operator has to act
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Capability this provider does not offer
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Request the provider cannot interpret
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model unknown to the model store or the server
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
