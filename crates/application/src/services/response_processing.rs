//! Response processing - Backend choices into host response envelopes
//!
//! Backends report a free-form finish reason and may leak the model's end
//! tokens into the text. Both paths below normalize that the same way, so a
//! streamed generation and a single response agree on text and stop reason.

use std::pin::Pin;

use domain::{
    ChatCompletionEventType, ChatCompletionResponse, ChatCompletionResponseStreamChunk,
    CompletionMessage, CompletionResponse, CompletionResponseStreamChunk, ContentDelta, StopReason,
};
use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::error::ApplicationError;
use crate::ports::{ChatCompletionStream, CompletionStream};

const END_OF_TURN_TOKEN: &str = "<|eot_id|>";
const END_OF_MESSAGE_TOKEN: &str = "<|eom_id|>";

/// One generated choice in the shape OpenAI-compatible backends return
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenAiCompatChoice {
    /// Why generation ended, once it has
    pub finish_reason: Option<String>,
    /// Generated text (the delta, when streaming)
    pub text: String,
}

impl OpenAiCompatChoice {
    /// Choice carrying `text`
    pub fn new(text: impl Into<String>, finish_reason: Option<String>) -> Self {
        Self {
            finish_reason,
            text: text.into(),
        }
    }
}

type ChoiceStream = Pin<Box<dyn Stream<Item = Result<OpenAiCompatChoice, ApplicationError>> + Send>>;

/// Map a backend finish reason to a stop reason
///
/// Anything that is not a recognized end of turn or end of message, including
/// no reason at all, counts as running out of tokens.
pub fn stop_reason_for(finish_reason: Option<&str>) -> StopReason {
    match finish_reason {
        Some("stop" | "eos" | "eos_token") => StopReason::EndOfTurn,
        Some("eom") => StopReason::EndOfMessage,
        _ => StopReason::OutOfTokens,
    }
}

/// Stop reason signalled by a bare end token
fn end_token_reason(text: &str) -> Option<StopReason> {
    match text {
        END_OF_TURN_TOKEN => Some(StopReason::EndOfTurn),
        END_OF_MESSAGE_TOKEN => Some(StopReason::EndOfMessage),
        _ => None,
    }
}

/// Strip a trailing end token, reporting the stop reason it implies
fn strip_end_token(text: &str) -> (String, Option<StopReason>) {
    if let Some(stripped) = text.strip_suffix(END_OF_TURN_TOKEN) {
        (stripped.to_string(), Some(StopReason::EndOfTurn))
    } else if let Some(stripped) = text.strip_suffix(END_OF_MESSAGE_TOKEN) {
        (stripped.to_string(), Some(StopReason::EndOfMessage))
    } else {
        (text.to_string(), None)
    }
}

/// Build the completion response for a single choice
pub fn process_completion_response(choice: &OpenAiCompatChoice) -> CompletionResponse {
    let (content, token_reason) = strip_end_token(&choice.text);
    CompletionResponse {
        content,
        stop_reason: token_reason
            .unwrap_or_else(|| stop_reason_for(choice.finish_reason.as_deref())),
    }
}

/// Build the chat completion response for a single choice
///
/// Tool calls are not decoded from the text.
pub fn process_chat_completion_response(choice: &OpenAiCompatChoice) -> ChatCompletionResponse {
    let CompletionResponse {
        content,
        stop_reason,
    } = process_completion_response(choice);

    ChatCompletionResponse {
        completion_message: CompletionMessage {
            content,
            stop_reason,
            tool_calls: Vec::new(),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Reading,
    Finishing,
    Done,
}

struct StreamState {
    choices: ChoiceStream,
    stop_reason: Option<StopReason>,
    phase: Phase,
}

impl StreamState {
    fn new<S>(choices: S, phase: Phase) -> Self
    where
        S: Stream<Item = Result<OpenAiCompatChoice, ApplicationError>> + Send + 'static,
    {
        Self {
            choices: Box::pin(choices),
            stop_reason: None,
            phase,
        }
    }

    /// Record what `choice` says about stopping and return its visible text
    ///
    /// The returned flag is true once the backend reported a finish reason.
    fn absorb(&mut self, choice: OpenAiCompatChoice) -> (String, bool) {
        let mut text = choice.text;
        // Only a chunk that is exactly an end token is swallowed. A token glued
        // to text ("Paris<|eot_id|>") passes through, unlike the single-response path.
        if let Some(reason) = end_token_reason(&text) {
            self.stop_reason = Some(reason);
            text.clear();
        }

        let finished = choice.finish_reason.is_some();
        if finished && self.stop_reason.is_none() {
            self.stop_reason = Some(stop_reason_for(choice.finish_reason.as_deref()));
        }
        (text, finished)
    }

    fn final_stop_reason(&self) -> StopReason {
        self.stop_reason.unwrap_or(StopReason::OutOfTokens)
    }
}

/// Turn a stream of choices into completion chunks
///
/// Each choice yields one chunk, except bare end tokens which only set the
/// stop reason. Reading stops at the first finish reason, and the stream
/// always closes with an empty chunk carrying the final stop reason.
pub fn process_completion_stream_response<S>(choices: S) -> CompletionStream
where
    S: Stream<Item = Result<OpenAiCompatChoice, ApplicationError>> + Send + 'static,
{
    let state = StreamState::new(choices, Phase::Reading);

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            match state.phase {
                Phase::Done => return None,
                Phase::Start | Phase::Finishing => {
                    state.phase = Phase::Done;
                    debug!(stop_reason = ?state.final_stop_reason(), "Completion stream finished");
                    let chunk = CompletionResponseStreamChunk {
                        delta: String::new(),
                        stop_reason: Some(state.final_stop_reason()),
                    };
                    return Some((Ok(chunk), state));
                },
                Phase::Reading => match state.choices.next().await {
                    None => state.phase = Phase::Finishing,
                    Some(Err(e)) => {
                        debug!(error = %e, "Choice stream failed");
                        state.phase = Phase::Done;
                        return Some((Err(e), state));
                    },
                    Some(Ok(choice)) => {
                        let swallowed = end_token_reason(&choice.text).is_some();
                        let (text, finished) = state.absorb(choice);
                        if finished {
                            state.phase = Phase::Finishing;
                        } else if swallowed {
                            continue;
                        }
                        let chunk = CompletionResponseStreamChunk {
                            delta: text,
                            stop_reason: state.stop_reason,
                        };
                        return Some((Ok(chunk), state));
                    },
                },
            }
        }
    }))
}

/// Turn a stream of choices into chat completion events
///
/// Emits a `start` event, a `progress` event per non-empty text delta, and a
/// `complete` event carrying the stop reason once a finish reason arrives or
/// the choices run out.
pub fn process_chat_completion_stream_response<S>(choices: S) -> ChatCompletionStream
where
    S: Stream<Item = Result<OpenAiCompatChoice, ApplicationError>> + Send + 'static,
{
    let state = StreamState::new(choices, Phase::Start);

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            match state.phase {
                Phase::Done => return None,
                Phase::Start => {
                    state.phase = Phase::Reading;
                    let chunk = ChatCompletionResponseStreamChunk::new(
                        ChatCompletionEventType::Start,
                        ContentDelta::text(""),
                        None,
                    );
                    return Some((Ok(chunk), state));
                },
                Phase::Finishing => {
                    state.phase = Phase::Done;
                    debug!(stop_reason = ?state.final_stop_reason(), "Chat completion stream finished");
                    let chunk = ChatCompletionResponseStreamChunk::new(
                        ChatCompletionEventType::Complete,
                        ContentDelta::text(""),
                        Some(state.final_stop_reason()),
                    );
                    return Some((Ok(chunk), state));
                },
                Phase::Reading => match state.choices.next().await {
                    None => state.phase = Phase::Finishing,
                    Some(Err(e)) => {
                        debug!(error = %e, "Choice stream failed");
                        state.phase = Phase::Done;
                        return Some((Err(e), state));
                    },
                    Some(Ok(choice)) => {
                        let (text, finished) = state.absorb(choice);
                        if finished {
                            state.phase = Phase::Finishing;
                        }
                        if text.is_empty() {
                            continue;
                        }
                        let chunk = ChatCompletionResponseStreamChunk::new(
                            ChatCompletionEventType::Progress,
                            ContentDelta::text(text),
                            None,
                        );
                        return Some((Ok(chunk), state));
                    },
                },
            }
        }
    }))
}
