//! In-memory model store
//!
//! Stands in for the host's model registry when the provider runs on its own.

use std::collections::HashMap;

use application::{ApplicationError, ModelStorePort};
use async_trait::async_trait;
use domain::Model;
use parking_lot::RwLock;

/// Model store backed by a map keyed on the host identifier
#[derive(Debug, Default)]
pub struct InMemoryModelStore {
    models: RwLock<HashMap<String, Model>>,
}

impl InMemoryModelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `models`
    pub fn with_models(models: impl IntoIterator<Item = Model>) -> Self {
        let store = Self::new();
        for model in models {
            store.insert(model);
        }
        store
    }

    /// Add or replace a model
    pub fn insert(&self, model: Model) {
        self.models.write().insert(model.identifier.clone(), model);
    }

    /// Remove a model, returning it if it was present
    pub fn remove(&self, identifier: &str) -> Option<Model> {
        self.models.write().remove(identifier)
    }

    /// Number of stored models
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}

#[async_trait]
impl ModelStorePort for InMemoryModelStore {
    async fn get_model(&self, identifier: &str) -> Result<Model, ApplicationError> {
        self.models
            .read()
            .get(identifier)
            .cloned()
            .ok_or_else(|| ApplicationError::ModelNotFound(identifier.to_string()))
    }
}
