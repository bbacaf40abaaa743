//! Value objects - Immutable request parameters

mod response_format;
mod sampling;
mod stop_reason;

pub use response_format::ResponseFormat;
pub use sampling::{LogProbConfig, SamplingParams, SamplingStrategy};
pub use stop_reason::StopReason;
