//! Registered models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a model is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Text generation
    #[default]
    Llm,
    /// Vector embeddings
    Embedding,
}

/// A model known to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Identifier callers use
    pub identifier: String,
    /// Identifier the provider's backend uses
    pub provider_resource_id: String,
    /// Provider serving the model
    pub provider_id: String,
    /// Model kind
    #[serde(default)]
    pub model_type: ModelType,
    /// Free-form provider metadata
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Model {
    /// An LLM whose backend id equals its public identifier
    pub fn llm(identifier: impl Into<String>, provider_id: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            provider_resource_id: identifier.clone(),
            identifier,
            provider_id: provider_id.into(),
            model_type: ModelType::Llm,
            metadata: Map::new(),
        }
    }

    /// Override the backend id
    #[must_use]
    pub fn with_provider_resource_id(mut self, id: impl Into<String>) -> Self {
        self.provider_resource_id = id.into();
        self
    }
}
