//! Test utilities for integration tests
use chatbot::ai::chat::{ChatBuilder, ChatSession};
use reqwest::blocking::Client;
use serde_json::json;

/// Creates a chat session with default settings pointed at
/// `api_hostname`, usually a `mockito` server URL.
pub fn test_chat(api_hostname: &str) -> ChatSession {
    test_builder(api_hostname, "test-api-key", "gpt-4o-mini")
        .build()
        .expect("Failed to build chat session")
}

/// A `ChatBuilder` whose HTTP client skips any proxy configured in
/// the environment so requests reach the local mock server.
pub fn test_builder(api_hostname: &str, api_key: &str, model: &str) -> ChatBuilder {
    let client = Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client");
    ChatBuilder::new(api_hostname, api_key, model).client(client)
}

/// A chat completion response body carrying `content` as the reply.
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 9,
            "completion_tokens": 12,
            "total_tokens": 21
        }
    })
    .to_string()
}
