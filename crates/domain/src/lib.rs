//! Domain layer for the Podman AI Lab provider
//!
//! Normalized request and response types shared by the host and its
//! inference providers. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
