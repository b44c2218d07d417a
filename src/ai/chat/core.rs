use std::fmt;
use std::time::Duration;

use anyhow::{Error, Result};
use reqwest::blocking::Client;

use super::models::{DEFAULT_SYSTEM_MESSAGE, Transcript};
use crate::openai::{
    ChatError, ChatRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, Message, Role, completion,
    parse_reply,
};

/// A stateful, blocking chat with an LLM over an OpenAI compatible
/// chat completions API.
///
/// Every turn sends the whole transcript plus the new user message
/// and records both sides of the exchange, even when the request
/// fails. Failures are reported in-band as the assistant reply.
///
/// Use `ChatBuilder::new()` to construct a valid `ChatSession`.
pub struct ChatSession {
    api_hostname: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    client: Client,
    transcript: Transcript,
}

impl ChatSession {
    /// Runs the next turn in the chat and returns the reply text,
    /// which is either the model's answer or a description of what
    /// went wrong.
    pub fn send_turn(&mut self, user_text: &str) -> String {
        let reply = match self.complete(user_text) {
            Ok(reply) => reply,
            Err(err) => {
                match &err {
                    ChatError::Transport(cause) => {
                        tracing::warn!("Chat completion request failed: {}", cause)
                    }
                    ChatError::Malformed(cause) => {
                        tracing::warn!("Chat completion response is not valid JSON: {}", cause)
                    }
                    other => tracing::warn!("Chat completion failed: {:?}", other),
                }
                err.to_string()
            }
        };

        self.transcript.push(Message::new(Role::User, user_text));
        self.transcript.push(Message::new(Role::Assistant, &reply));

        reply
    }

    /// Requests a completion for the current transcript followed by
    /// `user_text`. The transcript itself is not modified.
    pub fn complete(&self, user_text: &str) -> Result<String, ChatError> {
        let mut messages = self.transcript.messages();
        messages.push(Message::new(Role::User, user_text));

        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let body = completion(&self.client, &request, &self.api_hostname, &self.api_key)?;
        parse_reply(&body)
    }

    /// Discards all turns and restores `DEFAULT_SYSTEM_MESSAGE`,
    /// whatever system message the session started with.
    pub fn reset_history(&mut self) {
        self.transcript.reset(DEFAULT_SYSTEM_MESSAGE);
        tracing::debug!("Conversation history cleared");
    }

    pub fn set_system_prompt(&mut self, text: &str) {
        self.transcript.set_system_message(text);
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> Vec<Message> {
        self.transcript.messages()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("api_hostname", &self.api_hostname)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("transcript", &self.transcript)
            .finish()
    }
}

pub struct ChatBuilder {
    api_hostname: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    system_message: String,
    client: Option<Client>,
    transcript: Option<Transcript>,
}

impl ChatBuilder {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            client: None,
            transcript: None,
        }
    }

    pub fn build(self) -> Result<ChatSession, Error> {
        let client = match self.client {
            Some(client) => client,
            // No timeout, a turn waits for the API for as long as it takes
            None => Client::builder().timeout(None::<Duration>).build()?,
        };

        // Start with only the default system message unless an
        // existing transcript was provided
        let transcript = self
            .transcript
            .unwrap_or_else(|| Transcript::with_system_message(&self.system_message));

        Ok(ChatSession {
            api_hostname: self.api_hostname,
            api_key: self.api_key,
            model: self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            client,
            transcript,
        })
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the system message the session starts with. Resetting the
    /// history always goes back to `DEFAULT_SYSTEM_MESSAGE`.
    pub fn system_message(mut self, content: &str) -> Self {
        self.system_message = content.to_string();
        self
    }

    /// Uses a preconfigured HTTP client, e.g. one with custom proxy or
    /// TLS settings, instead of the default.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn transcript(mut self, messages: Vec<Message>) -> Self {
        self.transcript = Some(Transcript::new_with_messages(messages));
        self
    }
}
