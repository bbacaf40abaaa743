//! Provider registration
//!
//! Describes the provider to the host and builds a ready-to-use adapter.
//! An adapter is only handed out after its startup connectivity check succeeded.

use std::sync::Arc;

use application::{ApplicationError, InferencePort, ModelStorePort};
use serde::Serialize;
use tracing::{info, instrument};

use crate::adapters::PodmanAiLabInferenceAdapter;
use crate::config::PodmanAiLabConfig;

/// Host API a provider serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderApi {
    /// Text and chat generation
    Inference,
}

/// What the host needs to know to list and load the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSpec {
    pub api: ProviderApi,
    pub adapter_type: &'static str,
    pub provider_type: &'static str,
    /// Name of the configuration type the provider is built from
    pub config_type: &'static str,
    pub description: &'static str,
}

/// Registration entry for the Podman AI Lab remote inference provider
pub fn provider_spec() -> ProviderSpec {
    ProviderSpec {
        api: ProviderApi::Inference,
        adapter_type: "podman-ai-lab",
        provider_type: "remote::podman-ai-lab",
        config_type: "PodmanAiLabConfig",
        description: "Inference through a local Podman AI Lab server (Ollama API)",
    }
}

/// Validate `config`, build the adapter and run its startup connectivity check
///
/// Returns no adapter when the check fails; the error tells the operator what
/// to do.
#[instrument(skip_all, fields(url = %config.url))]
pub async fn get_adapter_impl(
    config: PodmanAiLabConfig,
    model_store: Arc<dyn ModelStorePort>,
) -> Result<Arc<PodmanAiLabInferenceAdapter>, ApplicationError> {
    config.validate_config()?;

    let adapter = PodmanAiLabInferenceAdapter::new(config, model_store)?;
    adapter.initialize().await?;

    info!(provider = provider_spec().provider_type, "Provider ready");
    Ok(Arc::new(adapter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryModelStore;

    #[test]
    fn provider_names_remote_type() {
        let spec = provider_spec();
        assert_eq!(spec.api, ProviderApi::Inference);
        assert_eq!(spec.provider_type, "remote::podman-ai-lab");
        assert_eq!(spec.adapter_type, "podman-ai-lab");
    }

    #[test]
    fn provider_entry_serializes_api_in_snake_case() {
        let value = serde_json::to_value(provider_spec()).unwrap();
        assert_eq!(value["api"], "inference");
        assert_eq!(value["config_type"], "PodmanAiLabConfig");
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_connecting() {
        let err = get_adapter_impl(
            PodmanAiLabConfig::new("no scheme"),
            Arc::new(InMemoryModelStore::new()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}
