//! Image resolver port - Turns image references into transport payloads

use async_trait::async_trait;
use domain::ImageSource;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for loading image bytes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageResolverPort: Send + Sync {
    /// Load the image and return it base64 encoded, without a `data:` prefix
    async fn resolve(&self, image: &ImageSource) -> Result<String, ApplicationError>;
}
