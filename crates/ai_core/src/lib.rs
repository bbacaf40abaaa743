//! AI Core - Transport to Ollama-compatible inference servers
//!
//! Sends generate and chat requests, lists installed models, and decodes
//! newline-delimited JSON streams.

pub mod config;
pub mod error;
pub mod ollama;

pub use config::OllamaClientConfig;
pub use error::InferenceError;
pub use ollama::{
    ListedModel, OllamaClient, TransportResponse, TransportStream, WireInput, WireMessage,
    WireOptions, WireRequest,
};
