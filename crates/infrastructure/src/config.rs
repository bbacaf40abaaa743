//! Provider configuration
//!
//! The provider recognizes a single setting, the base URL of the Podman AI
//! Lab server. It is read from defaults, an optional `podman_ai_lab.toml`,
//! and `PODMAN_AI_LAB_*` environment variables, in that order.

use application::ApplicationError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default Podman AI Lab endpoint
pub const DEFAULT_URL: &str = "http://localhost:10434";

/// Environment variable prefix for overrides (e.g. `PODMAN_AI_LAB_URL`)
pub const ENV_PREFIX: &str = "PODMAN_AI_LAB";

/// Podman AI Lab provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PodmanAiLabConfig {
    /// Base URL of the Ollama-compatible endpoint
    #[serde(default = "default_url")]
    #[validate(url(message = "url must be an absolute URL"))]
    pub url: String,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

impl Default for PodmanAiLabConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

impl PodmanAiLabConfig {
    /// Config pointing at `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("url", DEFAULT_URL)?
            .add_source(config::File::with_name("podman_ai_lab").required(false))
            // Override with environment variables (e.g., PODMAN_AI_LAB_URL)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Parse configuration from TOML text, applying defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("url", DEFAULT_URL)?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Check the configuration before the provider is built
    pub fn validate_config(&self) -> Result<(), ApplicationError> {
        self.validate()
            .map_err(|e| ApplicationError::Configuration(format!("Invalid Podman AI Lab config: {e}")))
    }

    /// Run-config snippet for distributions, resolved from the environment at run time
    pub fn sample_run_config() -> serde_json::Value {
        serde_json::json!({
            "url": format!("${{env.{ENV_PREFIX}_URL:{DEFAULT_URL}}}"),
        })
    }
}
