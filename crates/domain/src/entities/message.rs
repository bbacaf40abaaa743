//! Conversation messages

use serde::{Deserialize, Serialize};

use super::content::InterleavedContent;
use super::tool::ToolCall;
use crate::value_objects::StopReason;

/// A message in a chat request, tagged by role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Message from the user
    User {
        /// Message content
        content: InterleavedContent,
    },
    /// System prompt or instruction
    System {
        /// Message content
        content: InterleavedContent,
    },
    /// Earlier model output
    Assistant {
        /// Message content
        content: InterleavedContent,
        /// Why that turn ended
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stop_reason: Option<StopReason>,
        /// Tool calls made in that turn
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// Result of a tool call
    Tool {
        /// Call this responds to
        call_id: String,
        /// Tool output
        content: InterleavedContent,
    },
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<InterleavedContent>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<InterleavedContent>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<InterleavedContent>) -> Self {
        Self::Assistant {
            content: content.into(),
            stop_reason: None,
            tool_calls: Vec::new(),
        }
    }

    /// Create a tool response message
    pub fn tool(call_id: impl Into<String>, content: impl Into<InterleavedContent>) -> Self {
        Self::Tool {
            call_id: call_id.into(),
            content: content.into(),
        }
    }

    /// Role name as used on the wire
    pub const fn role(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::System { .. } => "system",
            Self::Assistant { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    /// Message content
    pub const fn content(&self) -> &InterleavedContent {
        match self {
            Self::User { content }
            | Self::System { content }
            | Self::Assistant { content, .. }
            | Self::Tool { content, .. } => content,
        }
    }
}
