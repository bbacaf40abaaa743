//! Inference port - The capability contract an inference provider fulfils
//!
//! The host calls providers only through this trait. The method set and the
//! result shapes are fixed; a provider that lacks a capability still answers,
//! with `ApplicationError::NotImplemented`.

use std::pin::Pin;

use async_trait::async_trait;
use domain::{
    ChatCompletionResponse, ChatCompletionResponseStreamChunk, CompletionResponse,
    CompletionResponseStreamChunk, EmbeddingTaskType, EmbeddingsResponse, InterleavedContent,
    LogProbConfig, Message, OpenAiChatCompletion, OpenAiChatCompletionParams, OpenAiCompletion,
    OpenAiCompletionParams, ResponseFormat, SamplingParams, TextTruncation, ToolChoice,
    ToolConfig, ToolDefinition, ToolPromptFormat,
};
use futures::Stream;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Lazy, single-use stream of completion chunks
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<CompletionResponseStreamChunk, ApplicationError>> + Send>>;

/// Lazy, single-use stream of chat completion events
pub type ChatCompletionStream = Pin<
    Box<dyn Stream<Item = Result<ChatCompletionResponseStreamChunk, ApplicationError>> + Send>,
>;

/// Result of a completion call: one response, or a stream when requested
pub enum CompletionOutcome {
    /// Materialized result
    Response(CompletionResponse),
    /// Incremental chunks
    Stream(CompletionStream),
}

impl CompletionOutcome {
    /// The materialized response, if the call was not streamed
    pub fn into_response(self) -> Option<CompletionResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Stream(_) => None,
        }
    }

    /// The stream, if the call was streamed
    pub fn into_stream(self) -> Option<CompletionStream> {
        match self {
            Self::Response(_) => None,
            Self::Stream(stream) => Some(stream),
        }
    }
}

impl std::fmt::Debug for CompletionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Response(response) => f.debug_tuple("Response").field(response).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Result of a chat completion call: one response, or a stream when requested
pub enum ChatCompletionOutcome {
    /// Materialized result
    Response(ChatCompletionResponse),
    /// Start, progress and complete events
    Stream(ChatCompletionStream),
}

impl ChatCompletionOutcome {
    /// The materialized response, if the call was not streamed
    pub fn into_response(self) -> Option<ChatCompletionResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Stream(_) => None,
        }
    }

    /// The stream, if the call was streamed
    pub fn into_stream(self) -> Option<ChatCompletionStream> {
        match self {
            Self::Response(_) => None,
            Self::Stream(stream) => Some(stream),
        }
    }
}

impl std::fmt::Debug for ChatCompletionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Response(response) => f.debug_tuple("Response").field(response).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Port for inference operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Prepare the provider; fails when the backend cannot be used
    async fn initialize(&self) -> Result<(), ApplicationError>;

    /// Release provider resources
    async fn shutdown(&self) -> Result<(), ApplicationError>;

    /// Raw text completion
    async fn completion(
        &self,
        model_id: &str,
        content: InterleavedContent,
        sampling_params: Option<SamplingParams>,
        response_format: Option<ResponseFormat>,
        stream: bool,
        logprobs: Option<LogProbConfig>,
    ) -> Result<CompletionOutcome, ApplicationError>;

    /// Multi-turn chat completion
    #[allow(clippy::too_many_arguments)]
    async fn chat_completion(
        &self,
        model_id: &str,
        messages: Vec<Message>,
        sampling_params: Option<SamplingParams>,
        response_format: Option<ResponseFormat>,
        tools: Vec<ToolDefinition>,
        tool_choice: Option<ToolChoice>,
        tool_prompt_format: Option<ToolPromptFormat>,
        stream: bool,
        logprobs: Option<LogProbConfig>,
        tool_config: Option<ToolConfig>,
    ) -> Result<ChatCompletionOutcome, ApplicationError>;

    /// Embed each content item
    async fn embeddings(
        &self,
        model_id: &str,
        contents: Vec<InterleavedContent>,
        text_truncation: Option<TextTruncation>,
        output_dimension: Option<u32>,
        task_type: Option<EmbeddingTaskType>,
    ) -> Result<EmbeddingsResponse, ApplicationError>;

    /// OpenAI-compatible completion; `None` when the provider produces no result
    async fn openai_completion(
        &self,
        params: OpenAiCompletionParams,
    ) -> Result<Option<OpenAiCompletion>, ApplicationError>;

    /// OpenAI-compatible chat completion; `None` when the provider produces no result
    async fn openai_chat_completion(
        &self,
        params: OpenAiChatCompletionParams,
    ) -> Result<Option<OpenAiChatCompletion>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::StopReason;
    use futures::StreamExt;

    #[tokio::test]
    async fn mock_inference_port_returns_configured_response() {
        let mut mock = MockInferencePort::new();
        mock.expect_completion().returning(|_, _, _, _, _, _| {
            Ok(CompletionOutcome::Response(CompletionResponse {
                content: "hi".to_string(),
                stop_reason: StopReason::EndOfTurn,
            }))
        });

        let outcome = mock
            .completion("m", "hello".into(), None, None, false, None)
            .await
            .unwrap();
        let response = outcome.into_response().unwrap();
        assert_eq!(response.content, "hi");
    }

    #[tokio::test]
    async fn stream_outcome_yields_chunks() {
        let chunks = vec![Ok(CompletionResponseStreamChunk {
            delta: "a".to_string(),
            stop_reason: None,
        })];
        let outcome = CompletionOutcome::Stream(Box::pin(futures::stream::iter(chunks)));
        assert!(format!("{outcome:?}").contains("Stream"));

        let items: Vec<_> = outcome.into_stream().unwrap().collect().await;
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn response_outcome_has_no_stream() {
        let outcome = ChatCompletionOutcome::Response(ChatCompletionResponse {
            completion_message: domain::CompletionMessage {
                content: String::new(),
                stop_reason: StopReason::OutOfTokens,
                tool_calls: Vec::new(),
            },
        });
        assert!(outcome.into_stream().is_none());
    }
}
