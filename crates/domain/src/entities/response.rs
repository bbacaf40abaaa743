//! Normalized inference responses

use serde::{Deserialize, Serialize};

use super::tool::ToolCall;
use crate::value_objects::StopReason;

/// Result of a non-streaming text completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Why generation stopped
    pub stop_reason: StopReason,
}

/// One increment of a streaming text completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponseStreamChunk {
    /// Text added by this chunk
    pub delta: String,
    /// Set once the stop reason is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

/// The assistant turn produced by a chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    /// Generated text
    pub content: String,
    /// Why generation stopped
    pub stop_reason: StopReason,
    /// Tool calls decoded from the output
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

/// Result of a non-streaming chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// The assistant turn
    pub completion_message: CompletionMessage,
}

/// Phase of a streamed chat completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatCompletionEventType {
    /// First event, empty delta
    Start,
    /// Text delta
    Progress,
    /// Last event, carries the stop reason
    Complete,
}

/// Incremental content of a chat stream event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentDelta {
    /// Text fragment
    Text {
        /// The fragment
        text: String,
    },
}

impl ContentDelta {
    /// Text fragment
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Fragment text
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// An event in a streamed chat completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionResponseEvent {
    /// Event phase
    pub event_type: ChatCompletionEventType,
    /// Content added by this event
    pub delta: ContentDelta,
    /// Set on the completing event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

/// One increment of a streaming chat completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionResponseStreamChunk {
    /// The event
    pub event: ChatCompletionResponseEvent,
}

impl ChatCompletionResponseStreamChunk {
    /// Build a chunk from its event parts
    pub fn new(
        event_type: ChatCompletionEventType,
        delta: ContentDelta,
        stop_reason: Option<StopReason>,
    ) -> Self {
        Self {
            event: ChatCompletionResponseEvent {
                event_type,
                delta,
                stop_reason,
            },
        }
    }
}

/// How inputs longer than the context are handled when embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTruncation {
    /// Fail on overlong input
    #[default]
    None,
    /// Drop from the start
    Start,
    /// Drop from the end
    End,
}

/// Intended use of an embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingTaskType {
    /// Search query
    Query,
    /// Indexed document
    Document,
}

/// Result of an embeddings call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    /// One vector per input
    pub embeddings: Vec<Vec<f32>>,
}
