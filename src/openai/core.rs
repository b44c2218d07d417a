use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ChatError;

pub const DEFAULT_API_HOSTNAME: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Body of a chat completion request. Rebuilt for every turn from the
/// live transcript and never stored.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
}

pub fn chat_completions_url(api_hostname: &str) -> String {
    format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"))
}

/// Sends a single chat completion request and returns the raw
/// response body.
///
/// The status code is not checked: the API reports failures such as
/// an invalid key as an `error` object in the body, which is left for
/// `parse_reply` to interpret.
pub fn completion(
    client: &Client,
    request: &ChatRequest,
    api_hostname: &str,
    api_key: &str,
) -> Result<String, ChatError> {
    let url = chat_completions_url(api_hostname);
    tracing::debug!(
        "POST {} model={} messages={}",
        url,
        request.model,
        request.messages.len()
    );

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .header(CONTENT_TYPE, "application/json")
        .json(request)
        .send()?;

    tracing::debug!("Completion response status: {}", response.status());
    let body = response.text()?;

    Ok(body)
}

/// Extracts the assistant reply from a chat completion response body.
pub fn parse_reply(body: &str) -> Result<String, ChatError> {
    if body.trim().is_empty() {
        return Err(ChatError::EmptyResponse);
    }

    let resp: Value = serde_json::from_str(body)?;

    // Indexing a `Value` never panics, a missing or empty `choices`
    // array just yields `Null`. A present but null `content` (refusals,
    // tool calls) is an empty reply.
    match resp["choices"][0]["message"].get("content") {
        Some(Value::String(content)) => return Ok(content.clone()),
        Some(Value::Null) => return Ok(String::new()),
        _ => {}
    }

    if let Some(message) = resp["error"]["message"].as_str() {
        return Err(ChatError::Api(message.to_string()));
    }

    Err(ChatError::UnexpectedShape)
}
