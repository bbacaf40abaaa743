//! Prompt adapter - Flattens requests into raw model prompts
//!
//! Servers that accept `raw = true` apply no chat template of their own, so
//! the prompt must already be in the model family's format.

use domain::{
    ChatCompletionRequest, CompletionRequest, ContentItem, InterleavedContent, Message,
    ResponseFormat, StopReason, ToolCall,
};

use crate::error::ApplicationError;

const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
const END_OF_TURN: &str = "<|eot_id|>";
const END_OF_MESSAGE: &str = "<|eom_id|>";
const PYTHON_TAG: &str = "<|python_tag|>";

/// Prompt formats this adapter can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFamily {
    /// Llama 3.x header/eot format
    Llama3,
}

/// Prompt family for a backend model id, if it is one we can render
///
/// Matching ignores case and the separators used in tags like `llama3.2:3b`
/// or `Llama-3.1-8B`.
pub fn resolve_prompt_family(model: &str) -> Option<PromptFamily> {
    let normalized: String = model
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | '.' | ':' | ' ' | '/'))
        .flat_map(char::to_lowercase)
        .collect();

    normalized
        .contains("llama3")
        .then_some(PromptFamily::Llama3)
}

/// Instruction appended to the prompt for a response format
pub fn response_format_prompt(
    format: Option<&ResponseFormat>,
) -> Result<Option<String>, ApplicationError> {
    match format {
        None => Ok(None),
        Some(ResponseFormat::JsonSchema { json_schema }) => Ok(Some(format!(
            "Please respond in JSON format with the schema: {json_schema}"
        ))),
        Some(ResponseFormat::Grammar { .. }) => Err(ApplicationError::NotImplemented(
            "Grammar response format is not supported".to_string(),
        )),
        Some(ResponseFormat::Unrecognized { kind }) => Err(ApplicationError::InvalidInput(
            format!("Unknown response format type: {kind}"),
        )),
    }
}

/// Render a chat request as a raw prompt ending in an open assistant turn
pub fn chat_completion_request_to_prompt(
    request: &ChatCompletionRequest,
    family: PromptFamily,
) -> Result<String, ApplicationError> {
    let mut messages = request.messages.clone();
    if let Some(instruction) = response_format_prompt(request.response_format.as_ref())? {
        messages.push(Message::user(instruction));
    }

    match family {
        PromptFamily::Llama3 => Ok(encode_llama3_dialog(&messages)),
    }
}

/// Render a completion request as a raw prompt
pub fn completion_request_to_prompt(
    request: &CompletionRequest,
    family: Option<PromptFamily>,
) -> Result<String, ApplicationError> {
    let content = augment_content(&request.content, request.response_format.as_ref())?;
    let text = content.as_text();

    Ok(match family {
        Some(PromptFamily::Llama3) => format!("{BEGIN_OF_TEXT}{text}"),
        None => text,
    })
}

fn augment_content(
    content: &InterleavedContent,
    format: Option<&ResponseFormat>,
) -> Result<InterleavedContent, ApplicationError> {
    let Some(instruction) = response_format_prompt(format)? else {
        return Ok(content.clone());
    };

    let mut items = content.items();
    items.push(ContentItem::text(instruction));
    Ok(InterleavedContent::Items(items))
}

fn encode_llama3_dialog(messages: &[Message]) -> String {
    let mut prompt = String::from(BEGIN_OF_TEXT);
    for message in messages {
        encode_llama3_message(&mut prompt, message);
    }
    prompt.push_str(&llama3_header("assistant"));
    prompt
}

fn encode_llama3_message(prompt: &mut String, message: &Message) {
    let role = match message {
        Message::Tool { .. } => "ipython",
        other => other.role(),
    };
    prompt.push_str(&llama3_header(role));
    prompt.push_str(&message.content().as_text());

    let mut end = END_OF_TURN;
    if let Message::Assistant {
        stop_reason,
        tool_calls,
        ..
    } = message
    {
        for call in tool_calls {
            prompt.push_str(&encode_tool_call(call));
        }
        if *stop_reason == Some(StopReason::EndOfMessage) {
            end = END_OF_MESSAGE;
        }
    }
    prompt.push_str(end);
}

fn llama3_header(role: &str) -> String {
    format!("<|start_header_id|>{role}<|end_header_id|>\n\n")
}

fn encode_tool_call(call: &ToolCall) -> String {
    let body = serde_json::json!({
        "type": "function",
        "name": call.tool_name,
        "parameters": call.arguments,
    });
    format!("{PYTHON_TAG}{body}")
}
