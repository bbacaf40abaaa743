//! Application services - Host utilities shared by inference providers

pub mod prompt_adapter;
pub mod response_processing;
pub mod sampling;

pub use prompt_adapter::{
    PromptFamily, chat_completion_request_to_prompt, completion_request_to_prompt,
    resolve_prompt_family, response_format_prompt,
};
pub use response_processing::{
    OpenAiCompatChoice, process_chat_completion_response, process_chat_completion_stream_response,
    process_completion_response, process_completion_stream_response, stop_reason_for,
};
pub use sampling::{SamplingOptions, get_sampling_options};
