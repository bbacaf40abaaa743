//! Integration tests for the Ollama client using WireMock
//!
//! These tests mock the Ollama HTTP API to verify client behavior without
//! requiring an actual server.

use std::time::Duration;

use ai_core::{
    InferenceError, OllamaClient, OllamaClientConfig, WireInput, WireMessage, WireOptions,
    WireRequest,
};
use futures::StreamExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn client_for_mock(base_url: &str) -> OllamaClient {
    let config = OllamaClientConfig {
        base_url: base_url.to_string(),
        connect_timeout_ms: 5000,
        list_timeout_ms: 5000,
    };
    OllamaClient::new(config).expect("Failed to create client")
}

fn prompt_request_for_mock() -> WireRequest {
    WireRequest {
        model: "test-model".to_string(),
        input: WireInput::raw_prompt("Hello"),
        options: WireOptions {
            temperature: Some(0.0),
            ..Default::default()
        },
        stream: false,
        format: None,
    }
}

fn chat_request_for_mock() -> WireRequest {
    WireRequest {
        input: WireInput::messages(vec![WireMessage::text("user", "Hello")]),
        ..prompt_request_for_mock()
    }
}

/// Sample Ollama chat success response
fn chat_success_response() -> serde_json::Value {
    serde_json::json!({
        "model": "test-model",
        "message": {
            "role": "assistant",
            "content": "Hello! How can I help you today?"
        },
        "done": true,
        "done_reason": "stop",
        "prompt_eval_count": 10,
        "eval_count": 15
    })
}

/// Sample Ollama generate success response
fn generate_success_response() -> serde_json::Value {
    serde_json::json!({
        "model": "test-model",
        "response": "Hi there",
        "done": true,
        "done_reason": "length"
    })
}

/// Sample Ollama models list response
fn models_list_response() -> serde_json::Value {
    serde_json::json!({
        "models": [
            {"name": "llama3.2:3b", "size": 2_000_000_000_u64},
            {"name": "granite-7b-lab"}
        ]
    })
}

fn ndjson(lines: &[serde_json::Value]) -> String {
    lines
        .iter()
        .map(|line| format!("{line}\n"))
        .collect::<String>()
}

// =============================================================================
// Non-streaming Tests
// =============================================================================

mod request_tests {
    use super::*;

    #[tokio::test]
    async fn list_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(models_list_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let models = client.list().await.unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "llama3.2:3b");
        assert!(models[1].size.is_none());
    }

    #[tokio::test]
    async fn list_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let err = client.list().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn list_unreachable_server_is_connection_failure() {
        // Nothing listens on port 9 locally
        let client = client_for_mock("http://127.0.0.1:9");
        let err = client.list().await.unwrap_err();
        assert!(err.is_connection_failure(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "prompt": "Hello",
                "raw": true,
                "stream": false,
                "options": {"temperature": 0.0}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let response = client.generate(&prompt_request_for_mock()).await.unwrap();

        assert_eq!(response.text(), "Hi there");
        assert_eq!(response.finish_reason(), Some("length"));
        assert_eq!(response.model(), "test-model");
    }

    #[tokio::test]
    async fn chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let response = client.chat(&chat_request_for_mock()).await.unwrap();

        assert!(response.text().contains("Hello"));
        assert_eq!(response.finish_reason(), Some("stop"));
    }

    #[tokio::test]
    async fn send_dispatches_by_input() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        assert!(client.send(&chat_request_for_mock()).await.is_ok());
        assert!(client.send(&prompt_request_for_mock()).await.is_ok());
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let err = client.generate(&prompt_request_for_mock()).await.unwrap_err();

        assert!(matches!(err, InferenceError::ServerError(_)));
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal Server Error"));
    }

    #[tokio::test]
    async fn unknown_model_is_not_available() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error":"model not found"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let err = client.chat(&chat_request_for_mock()).await.unwrap_err();
        assert!(matches!(err, InferenceError::ModelNotAvailable(ref m) if m == "test-model"));
    }

    #[tokio::test]
    async fn invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let err = client.chat(&chat_request_for_mock()).await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }
}

// =============================================================================
// Streaming Tests
// =============================================================================

mod streaming_tests {
    use super::*;

    #[tokio::test]
    async fn generate_stream_yields_each_line() {
        let mock_server = MockServer::start().await;

        let body = ndjson(&[
            serde_json::json!({"model": "test-model", "response": "Hel", "done": false}),
            serde_json::json!({"model": "test-model", "response": "lo", "done": false}),
            serde_json::json!({"model": "test-model", "response": "", "done": true, "done_reason": "stop"}),
        ]);

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({"stream": true})))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let stream = client
            .generate_stream(&prompt_request_for_mock())
            .await
            .unwrap();
        let items: Vec<_> = stream.collect().await;

        assert_eq!(items.len(), 3);
        let text: String = items
            .iter()
            .map(|item| item.as_ref().unwrap().text().to_string())
            .collect();
        assert_eq!(text, "Hello");
        assert_eq!(items[2].as_ref().unwrap().finish_reason(), Some("stop"));
    }

    #[tokio::test]
    async fn chat_stream_yields_each_line() {
        let mock_server = MockServer::start().await;

        let body = ndjson(&[
            serde_json::json!({"message": {"role": "assistant", "content": "Hi"}, "done": false}),
            serde_json::json!({"message": {"role": "assistant", "content": ""}, "done": true, "done_reason": "length"}),
        ]);

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let stream = client.send_stream(&chat_request_for_mock()).await.unwrap();
        let items: Vec<_> = stream.collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().text(), "Hi");
        assert_eq!(items[1].as_ref().unwrap().finish_reason(), Some("length"));
    }

    #[tokio::test]
    async fn stream_error_status_fails_before_streaming() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let result = client.chat_stream(&chat_request_for_mock()).await;
        assert!(matches!(result, Err(InferenceError::ServerError(_))));
    }

    #[tokio::test]
    async fn stream_with_bad_line_reports_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{\"response\":\"ok\",\"done\":false}\ngarbage\n"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for_mock(&mock_server.uri());
        let items: Vec<_> = client
            .generate_stream(&prompt_request_for_mock())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(InferenceError::InvalidResponse(_))));
    }
}

// =============================================================================
// Timeout Tests
// =============================================================================

mod timeout_tests {
    use super::*;

    const SLOW_REPLY: Duration = Duration::from_millis(800);

    /// Timeouts well below how long the server takes to answer
    fn impatient_client_for_mock(base_url: &str) -> OllamaClient {
        let config = OllamaClientConfig {
            base_url: base_url.to_string(),
            connect_timeout_ms: 200,
            list_timeout_ms: 200,
        };
        OllamaClient::new(config).expect("Failed to create client")
    }

    #[tokio::test]
    async fn slow_generation_is_not_cut_off() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(generate_success_response())
                    .set_delay(SLOW_REPLY),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = impatient_client_for_mock(&mock_server.uri());
        let response = client.generate(&prompt_request_for_mock()).await.unwrap();

        assert_eq!(response.text(), "Hi there");
    }

    #[tokio::test]
    async fn slow_chat_stream_is_not_cut_off() {
        let mock_server = MockServer::start().await;

        let body = ndjson(&[
            serde_json::json!({"message": {"role": "assistant", "content": "Hi"}, "done": true, "done_reason": "stop"}),
        ]);

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .set_delay(SLOW_REPLY),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = impatient_client_for_mock(&mock_server.uri());
        let items: Vec<_> = client
            .send_stream(&chat_request_for_mock())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().text(), "Hi");
    }

    #[tokio::test]
    async fn slow_model_listing_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(models_list_response())
                    .set_delay(SLOW_REPLY),
            )
            .mount(&mock_server)
            .await;

        let client = impatient_client_for_mock(&mock_server.uri());
        let result = client.list().await;

        assert!(matches!(result, Err(InferenceError::Timeout(200))));
    }
}
