//! Domain entities - Requests, messages and responses exchanged with providers

mod content;
mod message;
mod model;
mod openai;
mod request;
mod response;
mod tool;

pub use content::{ContentItem, ImageSource, InterleavedContent};
pub use message::Message;
pub use model::{Model, ModelType};
pub use openai::{
    OpenAiChatCompletion, OpenAiChatCompletionParams, OpenAiCompletion, OpenAiCompletionParams,
    OpenAiPrompt, StopSequences,
};
pub use request::{ChatCompletionRequest, CompletionRequest};
pub use response::{
    ChatCompletionEventType, ChatCompletionResponse, ChatCompletionResponseEvent,
    ChatCompletionResponseStreamChunk, CompletionMessage, CompletionResponse,
    CompletionResponseStreamChunk, ContentDelta, EmbeddingTaskType, EmbeddingsResponse,
    TextTruncation,
};
pub use tool::{ToolCall, ToolChoice, ToolConfig, ToolDefinition, ToolParamDefinition, ToolPromptFormat};
