use std::env;
use std::fmt;

use anyhow::{Context, Result};

use crate::ai::chat::DEFAULT_SYSTEM_MESSAGE;
use crate::openai::{DEFAULT_API_HOSTNAME, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub system_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_hostname: DEFAULT_API_HOSTNAME.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
        }
    }
}

impl AppConfig {
    /// Built-in defaults overridden by any of the supported environment
    /// variables that are set. An empty `OPENAI_API_KEY` counts as
    /// unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let openai_api_hostname =
            env::var("CHATBOT_LLM_HOST").unwrap_or(defaults.openai_api_hostname);
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let openai_model = env::var("CHATBOT_LLM_MODEL").unwrap_or(defaults.openai_model);
        let max_tokens = match env::var("CHATBOT_MAX_TOKENS") {
            Ok(val) => val
                .parse()
                .with_context(|| format!("Invalid CHATBOT_MAX_TOKENS: {}", val))?,
            Err(_) => defaults.max_tokens,
        };
        let temperature = match env::var("CHATBOT_TEMPERATURE") {
            Ok(val) => val
                .parse()
                .with_context(|| format!("Invalid CHATBOT_TEMPERATURE: {}", val))?,
            Err(_) => defaults.temperature,
        };
        let system_message =
            env::var("CHATBOT_SYSTEM_MESSAGE").unwrap_or(defaults.system_message);

        Ok(Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            max_tokens,
            temperature,
            system_message,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_hostname", &self.openai_api_hostname)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_model", &self.openai_model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("system_message", &self.system_message)
            .finish()
    }
}
