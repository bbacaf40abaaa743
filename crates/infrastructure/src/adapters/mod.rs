//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod http_image_resolver;
mod in_memory_model_store;
mod podman_ai_lab_adapter;

pub use http_image_resolver::HttpImageResolver;
pub use in_memory_model_store::InMemoryModelStore;
pub use podman_ai_lab_adapter::{PodmanAiLabInferenceAdapter, SERVER_NOT_RUNNING};
