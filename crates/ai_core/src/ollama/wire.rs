//! Ollama request and response bodies
//!
//! Mirrors the JSON that `/api/generate`, `/api/chat` and `/api/tags`
//! exchange. Requests carry either a raw prompt or a message list, never both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Requests ───────────────────────────────────────────────────────

/// Body sent to `/api/generate` or `/api/chat`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireRequest {
    pub model: String,
    #[serde(flatten)]
    pub input: WireInput,
    pub options: WireOptions,
    pub stream: bool,
    /// JSON schema the output must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
}

impl WireRequest {
    /// Whether the request targets `/api/chat`
    pub const fn is_chat(&self) -> bool {
        matches!(self.input, WireInput::Messages { .. })
    }

    /// Endpoint under `/api` that accepts this request
    pub const fn endpoint(&self) -> &'static str {
        if self.is_chat() { "chat" } else { "generate" }
    }
}

/// What the model is asked to continue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireInput {
    /// Pre-formatted prompt; `raw` disables server-side templating
    Prompt { prompt: String, raw: bool },
    /// Role-tagged messages, templated by the server
    Messages { messages: Vec<WireMessage> },
}

impl WireInput {
    /// Prompt sent with `raw = true`
    pub fn raw_prompt(prompt: impl Into<String>) -> Self {
        Self::Prompt {
            prompt: prompt.into(),
            raw: true,
        }
    }

    /// Message list
    pub const fn messages(messages: Vec<WireMessage>) -> Self {
        Self::Messages { messages }
    }
}

/// One chat message; text and images travel in separate messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Base64-encoded image payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl WireMessage {
    /// Text message
    pub fn text(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(content.into()),
            images: None,
        }
    }

    /// Message carrying a single image
    pub fn image(role: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: None,
            images: Some(vec![image.into()]),
        }
    }
}

/// Sampling options understood by Ollama
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WireOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

// ── Responses ──────────────────────────────────────────────────────

/// A `/api/chat` reply or stream element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: String,
    pub message: ResponseMessage,
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// A `/api/generate` reply or stream element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    pub response: String,
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
}

/// Either response shape, told apart by `message` vs `response`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TransportResponse {
    Chat(ChatResponse),
    Generate(GenerateResponse),
}

impl TransportResponse {
    /// Generated text carried by this response
    pub fn text(&self) -> &str {
        match self {
            Self::Chat(r) => &r.message.content,
            Self::Generate(r) => &r.response,
        }
    }

    /// Whether this is the last element of the generation
    pub const fn is_done(&self) -> bool {
        match self {
            Self::Chat(r) => r.done,
            Self::Generate(r) => r.done,
        }
    }

    /// `done_reason`, only once the generation is done
    pub fn finish_reason(&self) -> Option<&str> {
        let reason = match self {
            Self::Chat(r) => r.done_reason.as_deref(),
            Self::Generate(r) => r.done_reason.as_deref(),
        };
        if self.is_done() { reason } else { None }
    }

    /// Model that produced the response
    pub fn model(&self) -> &str {
        match self {
            Self::Chat(r) => &r.model,
            Self::Generate(r) => &r.model,
        }
    }
}

/// `/api/tags` reply
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub models: Vec<ListedModel>,
}

/// A model installed on the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListedModel {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt_request() -> WireRequest {
        WireRequest {
            model: "granite".to_string(),
            input: WireInput::raw_prompt("Hello"),
            options: WireOptions::default(),
            stream: false,
            format: None,
        }
    }

    #[test]
    fn prompt_request_serializes_flat() {
        let value = serde_json::to_value(prompt_request()).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "granite",
                "prompt": "Hello",
                "raw": true,
                "options": {},
                "stream": false
            })
        );
    }

    #[test]
    fn messages_request_has_no_prompt() {
        let request = WireRequest {
            input: WireInput::messages(vec![WireMessage::text("user", "hi")]),
            ..prompt_request()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("prompt").is_none());
        assert!(value.get("raw").is_none());
        assert_eq!(value["messages"], json!([{"role": "user", "content": "hi"}]));
        assert_eq!(request.endpoint(), "chat");
    }

    #[test]
    fn prompt_request_targets_generate() {
        assert_eq!(prompt_request().endpoint(), "generate");
        assert!(!prompt_request().is_chat());
    }

    #[test]
    fn format_is_sent_when_present() {
        let request = WireRequest {
            format: Some(json!({"type": "object"})),
            ..prompt_request()
        };
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["format"], json!({"type": "object"}));
    }

    #[test]
    fn image_message_has_no_content() {
        let value = serde_json::to_value(WireMessage::image("user", "aGk=")).unwrap();
        assert_eq!(value, json!({"role": "user", "images": ["aGk="]}));
    }

    #[test]
    fn options_use_num_predict() {
        let options = WireOptions {
            num_predict: Some(32),
            ..Default::default()
        };
        let value = serde_json::to_value(options).unwrap();
        assert_eq!(value, json!({"num_predict": 32}));
    }

    #[test]
    fn chat_shape_is_detected() {
        let response: TransportResponse = serde_json::from_value(json!({
            "model": "granite",
            "message": {"role": "assistant", "content": "Hi"},
            "done": true,
            "done_reason": "stop"
        }))
        .unwrap();
        assert!(matches!(response, TransportResponse::Chat(_)));
        assert_eq!(response.text(), "Hi");
        assert_eq!(response.finish_reason(), Some("stop"));
    }

    #[test]
    fn generate_shape_is_detected() {
        let response: TransportResponse = serde_json::from_value(json!({
            "model": "granite",
            "response": "Hi",
            "done": false
        }))
        .unwrap();
        assert!(matches!(response, TransportResponse::Generate(_)));
        assert_eq!(response.text(), "Hi");
        assert!(response.finish_reason().is_none());
    }

    #[test]
    fn done_reason_ignored_until_done() {
        let response: TransportResponse = serde_json::from_value(json!({
            "response": "x",
            "done": false,
            "done_reason": "stop"
        }))
        .unwrap();
        assert!(response.finish_reason().is_none());
    }

    #[test]
    fn list_response_parses_names() {
        let list: ListResponse =
            serde_json::from_value(json!({"models": [{"name": "granite:8b", "size": 12}]}))
                .unwrap();
        assert_eq!(list.models[0].name, "granite:8b");
        assert_eq!(list.models[0].size, Some(12));
    }
}
