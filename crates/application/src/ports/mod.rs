//! Port definitions for application layer
//!
//! Ports are interfaces that define how the host and a provider interact.
//! Adapters in the infrastructure layer implement these ports.

mod image_resolver_port;
mod inference_port;
mod model_registration_port;
mod model_store_port;

#[cfg(test)]
pub use image_resolver_port::MockImageResolverPort;
pub use image_resolver_port::ImageResolverPort;
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{
    ChatCompletionOutcome, ChatCompletionStream, CompletionOutcome, CompletionStream,
    InferencePort,
};
#[cfg(test)]
pub use model_registration_port::MockModelRegistrationPort;
pub use model_registration_port::ModelRegistrationPort;
#[cfg(test)]
pub use model_store_port::MockModelStorePort;
pub use model_store_port::ModelStorePort;
