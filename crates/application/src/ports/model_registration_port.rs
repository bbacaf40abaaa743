//! Model registration port - Lets the host announce models to a provider

use async_trait::async_trait;
use domain::Model;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port through which the host registers and removes models
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelRegistrationPort: Send + Sync {
    /// Register a model, returning it as the provider accepted it
    async fn register_model(&self, model: Model) -> Result<Model, ApplicationError>;

    /// Forget a model
    async fn unregister_model(&self, model_id: &str) -> Result<(), ApplicationError>;
}
