//! Configuration for the Ollama transport client

use serde::{Deserialize, Serialize};

/// Connection settings for an Ollama-compatible server
///
/// Generation requests are never cut off once connected; local models can
/// take minutes to answer. Only establishing the connection and the model
/// listing used as the startup connectivity check are bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaClientConfig {
    /// Base URL of the server, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Time allowed to establish a connection, in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Total time allowed for listing models, in milliseconds
    #[serde(default = "default_list_timeout_ms")]
    pub list_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:10434".to_string()
}

const fn default_connect_timeout_ms() -> u64 {
    10000 // 10 seconds
}

const fn default_list_timeout_ms() -> u64 {
    60000 // 60 seconds
}

impl Default for OllamaClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            list_timeout_ms: default_list_timeout_ms(),
        }
    }
}

impl OllamaClientConfig {
    /// Config pointing at `base_url` with the default timeouts
    pub fn for_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
