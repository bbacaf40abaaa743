//! Normalized inference requests

use serde::{Deserialize, Serialize};

use super::content::InterleavedContent;
use super::message::Message;
use super::tool::{ToolConfig, ToolDefinition};
use crate::value_objects::{LogProbConfig, ResponseFormat, SamplingParams};

/// Raw text completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Backend model id
    pub model: String,
    /// Prompt content
    pub content: InterleavedContent,
    /// Generation controls
    #[serde(default)]
    pub sampling_params: SamplingParams,
    /// Output constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Whether to stream the result
    #[serde(default)]
    pub stream: bool,
    /// Log probability request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<LogProbConfig>,
}

impl CompletionRequest {
    /// Request with default sampling
    pub fn new(model: impl Into<String>, content: impl Into<InterleavedContent>) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            sampling_params: SamplingParams::default(),
            response_format: None,
            stream: false,
            logprobs: None,
        }
    }

    /// Whether the prompt carries images
    pub fn has_media(&self) -> bool {
        self.content.has_media()
    }
}

/// Multi-turn chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Backend model id
    pub model: String,
    /// Conversation so far
    pub messages: Vec<Message>,
    /// Generation controls
    #[serde(default)]
    pub sampling_params: SamplingParams,
    /// Output constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Tools the model may call
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    /// Tool settings
    #[serde(default)]
    pub tool_config: ToolConfig,
    /// Whether to stream the result
    #[serde(default)]
    pub stream: bool,
    /// Log probability request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<LogProbConfig>,
}

impl ChatCompletionRequest {
    /// Request with default sampling and no tools
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            sampling_params: SamplingParams::default(),
            response_format: None,
            tools: Vec::new(),
            tool_config: ToolConfig::default(),
            stream: false,
            logprobs: None,
        }
    }

    /// Whether any message carries images
    pub fn has_media(&self) -> bool {
        self.messages.iter().any(|m| m.content().has_media())
    }
}
