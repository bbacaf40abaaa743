//! Application layer - Provider contract and host utilities
//!
//! Defines the ports an inference provider implements and the services it
//! uses to shape prompts, sampling options and responses.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
