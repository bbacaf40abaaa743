//! Infrastructure layer - Podman AI Lab provider
//!
//! Implements the application ports against a Podman AI Lab server and
//! carries the provider's configuration, registration and logging setup.

pub mod adapters;
pub mod config;
pub mod registry;
pub mod telemetry;

pub use adapters::*;
pub use config::PodmanAiLabConfig;
pub use registry::{ProviderApi, ProviderSpec, get_adapter_impl, provider_spec};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
