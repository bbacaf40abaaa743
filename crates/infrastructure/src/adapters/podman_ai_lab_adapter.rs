//! Podman AI Lab inference adapter - Implements InferencePort using ai_core
//!
//! Podman AI Lab serves the Ollama API. Host requests are translated into
//! Ollama wire parameters, sent through a client built for the call, and the
//! replies are turned back into host responses.

use std::sync::Arc;

use ai_core::{
    InferenceError, OllamaClient, OllamaClientConfig, TransportResponse, WireInput, WireMessage,
    WireOptions, WireRequest,
};
use application::{
    ApplicationError, ChatCompletionOutcome, CompletionOutcome, ImageResolverPort, InferencePort,
    ModelRegistrationPort, ModelStorePort, OpenAiCompatChoice, chat_completion_request_to_prompt,
    completion_request_to_prompt, get_sampling_options, process_chat_completion_response,
    process_chat_completion_stream_response, process_completion_response,
    process_completion_stream_response, resolve_prompt_family,
};
use async_trait::async_trait;
use domain::{
    ChatCompletionRequest, CompletionRequest, ContentItem, EmbeddingTaskType, EmbeddingsResponse,
    InterleavedContent, LogProbConfig, Message, Model, OpenAiChatCompletion,
    OpenAiChatCompletionParams, OpenAiCompletion, OpenAiCompletionParams, ResponseFormat,
    SamplingParams, TextTruncation, ToolChoice, ToolConfig, ToolDefinition, ToolPromptFormat,
};
use futures::{Stream, StreamExt, TryStreamExt, stream};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::HttpImageResolver;
use crate::config::PodmanAiLabConfig;

/// Operator-facing message when the server cannot be reached at startup
pub const SERVER_NOT_RUNNING: &str =
    "Podman AI Lab Server is not running, start it using Podman Desktop";

/// Inference provider backed by a Podman AI Lab server
pub struct PodmanAiLabInferenceAdapter {
    config: PodmanAiLabConfig,
    model_store: Arc<dyn ModelStorePort>,
    image_resolver: Arc<dyn ImageResolverPort>,
}

impl std::fmt::Debug for PodmanAiLabInferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PodmanAiLabInferenceAdapter")
            .field("url", &self.config.url)
            .finish_non_exhaustive()
    }
}

impl PodmanAiLabInferenceAdapter {
    /// Create an adapter that downloads images over HTTP
    pub fn new(
        config: PodmanAiLabConfig,
        model_store: Arc<dyn ModelStorePort>,
    ) -> Result<Self, ApplicationError> {
        let image_resolver = Arc::new(HttpImageResolver::new()?);
        Ok(Self {
            config,
            model_store,
            image_resolver,
        })
    }

    /// Replace the image resolver
    #[must_use]
    pub fn with_image_resolver(mut self, image_resolver: Arc<dyn ImageResolverPort>) -> Self {
        self.image_resolver = image_resolver;
        self
    }

    /// Server URL this adapter talks to
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Transport client for one call; never pooled
    fn client(&self) -> Result<OllamaClient, ApplicationError> {
        OllamaClient::new(OllamaClientConfig::for_url(&self.config.url)).map_err(Self::map_error)
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Podman AI Lab connection failed: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            InferenceError::ModelNotAvailable(model) => ApplicationError::ModelNotFound(model),
            other => ApplicationError::Inference(other.to_string()),
        }
    }

    // ── Parameter construction ─────────────────────────────────────

    /// Wire parameters for a raw completion
    fn completion_params(request: &CompletionRequest) -> Result<WireRequest, ApplicationError> {
        if request.has_media() {
            return Err(ApplicationError::NotImplemented(
                "Ollama does not support media for Completion requests".to_string(),
            ));
        }
        let format = wire_format(request.response_format.as_ref())?;
        let family = resolve_prompt_family(&request.model);
        let prompt = completion_request_to_prompt(request, family)?;

        let params = WireRequest {
            model: request.model.clone(),
            input: WireInput::raw_prompt(prompt),
            options: wire_options(&request.sampling_params),
            stream: request.stream,
            format,
        };
        debug!(params = ?params, "Params to Podman AI Lab");
        Ok(params)
    }

    /// Wire parameters for a chat completion
    ///
    /// Models without a known prompt format, and requests with images, are
    /// sent as messages and templated by the server; everything else goes
    /// out as a raw prompt.
    async fn chat_params(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<WireRequest, ApplicationError> {
        let format = wire_format(request.response_format.as_ref())?;

        let input = match resolve_prompt_family(&request.model) {
            Some(family) if !request.has_media() => {
                WireInput::raw_prompt(chat_completion_request_to_prompt(request, family)?)
            },
            _ => WireInput::messages(self.wire_messages(&request.messages).await?),
        };

        let params = WireRequest {
            model: request.model.clone(),
            input,
            options: wire_options(&request.sampling_params),
            stream: request.stream,
            format,
        };
        debug!(params = ?params, "Params to Podman AI Lab");
        Ok(params)
    }

    /// One wire message per content item, images resolved to base64
    async fn wire_messages(&self, messages: &[Message]) -> Result<Vec<WireMessage>, ApplicationError> {
        let mut wire = Vec::new();
        for message in messages {
            let role = message.role();
            for item in message.content().items() {
                match item {
                    ContentItem::Text { text } => wire.push(WireMessage::text(role, text)),
                    ContentItem::Image { image } => {
                        let encoded = self.image_resolver.resolve(&image).await?;
                        wire.push(WireMessage::image(role, encoded));
                    },
                }
            }
        }
        Ok(wire)
    }

    // ── Dispatch ───────────────────────────────────────────────────

    async fn nonstream_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionOutcome, ApplicationError> {
        let params = Self::completion_params(request)?;
        let response = self
            .client()?
            .generate(&params)
            .await
            .map_err(Self::map_error)?;

        let choice = to_choice(&response);
        Ok(CompletionOutcome::Response(process_completion_response(&choice)))
    }

    fn stream_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionOutcome, ApplicationError> {
        let params = Self::completion_params(request)?;
        let choices = lazy_choices(self.client()?, params);
        Ok(CompletionOutcome::Stream(process_completion_stream_response(choices)))
    }

    async fn nonstream_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionOutcome, ApplicationError> {
        let params = self.chat_params(request).await?;
        let response = self
            .client()?
            .send(&params)
            .await
            .map_err(Self::map_error)?;

        let choice = to_choice(&response);
        Ok(ChatCompletionOutcome::Response(process_chat_completion_response(&choice)))
    }

    async fn stream_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionOutcome, ApplicationError> {
        let params = self.chat_params(request).await?;
        let choices = lazy_choices(self.client()?, params);
        Ok(ChatCompletionOutcome::Stream(process_chat_completion_stream_response(choices)))
    }
}

/// Sampling options with `max_tokens` re-keyed to `num_predict`
fn wire_options(params: &SamplingParams) -> WireOptions {
    let options = get_sampling_options(Some(params));
    WireOptions {
        temperature: options.temperature,
        top_p: options.top_p,
        top_k: options.top_k,
        num_predict: options.max_tokens,
        repeat_penalty: options.repeat_penalty,
        stop: options.stop,
    }
}

/// Wire `format` for a response format
fn wire_format(format: Option<&ResponseFormat>) -> Result<Option<Value>, ApplicationError> {
    match format {
        None => Ok(None),
        Some(ResponseFormat::JsonSchema { json_schema }) => Ok(Some(json_schema.clone())),
        Some(ResponseFormat::Grammar { .. }) => Err(ApplicationError::NotImplemented(
            "Grammar response format is not supported".to_string(),
        )),
        Some(ResponseFormat::Unrecognized { kind }) => Err(ApplicationError::InvalidInput(
            format!("Unknown response format type: {kind}"),
        )),
    }
}

fn to_choice(response: &TransportResponse) -> OpenAiCompatChoice {
    OpenAiCompatChoice::new(
        response.text(),
        response.finish_reason().map(ToString::to_string),
    )
}

/// Choices from a streamed request; the request is sent on first poll
fn lazy_choices(
    client: OllamaClient,
    params: WireRequest,
) -> impl Stream<Item = Result<OpenAiCompatChoice, ApplicationError>> + Send + 'static {
    stream::once(async move {
        client
            .send_stream(&params)
            .await
            .map_err(PodmanAiLabInferenceAdapter::map_error)
    })
    .map_ok(|elements| {
        elements.map(|element| {
            element
                .map(|response| to_choice(&response))
                .map_err(PodmanAiLabInferenceAdapter::map_error)
        })
    })
    .try_flatten()
}

#[async_trait]
impl InferencePort for PodmanAiLabInferenceAdapter {
    #[instrument(skip(self), fields(url = %self.config.url))]
    async fn initialize(&self) -> Result<(), ApplicationError> {
        info!("Checking connectivity to Podman AI Lab at `{}`...", self.config.url);

        match self.client()?.list().await {
            Ok(models) => {
                debug!(count = models.len(), "Podman AI Lab is reachable");
                Ok(())
            },
            Err(e) if e.is_connection_failure() => {
                warn!(error = %e, "Podman AI Lab is not reachable");
                Err(ApplicationError::ServiceUnavailable(
                    SERVER_NOT_RUNNING.to_string(),
                ))
            },
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn shutdown(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    #[instrument(skip(self, content, sampling_params, response_format, logprobs))]
    async fn completion(
        &self,
        model_id: &str,
        content: InterleavedContent,
        sampling_params: Option<SamplingParams>,
        response_format: Option<ResponseFormat>,
        stream: bool,
        logprobs: Option<LogProbConfig>,
    ) -> Result<CompletionOutcome, ApplicationError> {
        let model = self.model_store.get_model(model_id).await?;

        let request = CompletionRequest {
            model: model.provider_resource_id,
            content,
            sampling_params: sampling_params.unwrap_or_default(),
            response_format,
            stream,
            logprobs,
        };

        if stream {
            self.stream_completion(&request)
        } else {
            self.nonstream_completion(&request).await
        }
    }

    #[instrument(skip(
        self,
        messages,
        sampling_params,
        response_format,
        tools,
        tool_choice,
        tool_prompt_format,
        logprobs,
        tool_config
    ))]
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
    ) -> Result<ChatCompletionOutcome, ApplicationError> {
        let tool_config = tool_config.unwrap_or_else(|| ToolConfig {
            tool_choice: tool_choice.unwrap_or_default(),
            tool_prompt_format,
        });

        let request = ChatCompletionRequest {
            model: model_id.to_string(),
            messages,
            sampling_params: sampling_params.unwrap_or_default(),
            response_format,
            tools,
            tool_config,
            stream,
            logprobs,
        };

        if stream {
            self.stream_chat_completion(&request).await
        } else {
            self.nonstream_chat_completion(&request).await
        }
    }

    async fn embeddings(
        &self,
        _model_id: &str,
        _contents: Vec<InterleavedContent>,
        _text_truncation: Option<TextTruncation>,
        _output_dimension: Option<u32>,
        _task_type: Option<EmbeddingTaskType>,
    ) -> Result<EmbeddingsResponse, ApplicationError> {
        Err(ApplicationError::NotImplemented(
            "embeddings endpoint is not implemented".to_string(),
        ))
    }

    async fn openai_completion(
        &self,
        params: OpenAiCompletionParams,
    ) -> Result<Option<OpenAiCompletion>, ApplicationError> {
        warn!(model = %params.model, "OpenAI-compatible completion is not supported; no result");
        Ok(None)
    }

    async fn openai_chat_completion(
        &self,
        params: OpenAiChatCompletionParams,
    ) -> Result<Option<OpenAiChatCompletion>, ApplicationError> {
        warn!(model = %params.model, "OpenAI-compatible chat completion is not supported; no result");
        Ok(None)
    }
}

#[async_trait]
impl ModelRegistrationPort for PodmanAiLabInferenceAdapter {
    async fn register_model(&self, model: Model) -> Result<Model, ApplicationError> {
        Ok(model)
    }

    async fn unregister_model(&self, _model_id: &str) -> Result<(), ApplicationError> {
        Ok(())
    }
}
