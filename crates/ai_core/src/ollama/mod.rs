//! Ollama-compatible transport
//!
//! Podman AI Lab exposes the Ollama API, so the same client talks to both.

mod client;
mod streaming;
pub mod wire;

pub use client::OllamaClient;
pub use streaming::{TransportStream, decode_ndjson};
pub use wire::{
    ChatResponse, GenerateResponse, ListedModel, ResponseMessage, TransportResponse, WireInput,
    WireMessage, WireOptions, WireRequest,
};
