//! Model store port - Host-owned lookup of registered models

use async_trait::async_trait;
use domain::Model;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for resolving a host model id to its registration
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelStorePort: Send + Sync {
    /// Look up a registered model by its host identifier
    ///
    /// Fails with `ApplicationError::ModelNotFound` for unknown ids.
    async fn get_model(&self, identifier: &str) -> Result<Model, ApplicationError>;
}
