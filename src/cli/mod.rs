use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::AppConfig;

pub mod chat;

/// Chat with an OpenAI compatible LLM from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Model to chat with
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the chat completions API
    #[arg(long)]
    host: Option<String>,

    /// Maximum number of tokens in each reply
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,

    /// System message used at startup and after `clear`
    #[arg(long)]
    system: Option<String>,
}

impl Cli {
    /// Flags take precedence over the environment.
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(model) = self.model {
            config.openai_model = model;
        }
        if let Some(host) = self.host {
            config.openai_api_hostname = host;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(system) = self.system {
            config.system_message = system;
        }
    }
}

pub fn run() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so they don't interleave with the chat
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::from_env()?;
    args.apply(&mut config);
    tracing::debug!("Starting chat with {:?}", config);

    chat::run(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Cli::try_parse_from([
            "chatbot",
            "--model",
            "gpt-4o",
            "--host",
            "http://localhost:8080",
            "--max-tokens",
            "300",
            "--temperature",
            "1.0",
            "--system",
            "Be terse.",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.openai_api_hostname, "http://localhost:8080");
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.system_message, "Be terse.");
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let args = Cli::try_parse_from(["chatbot"]).unwrap();

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_api_hostname, "https://api.openai.com");
        assert_eq!(config.max_tokens, 150);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_invalid_flag_value() {
        assert!(Cli::try_parse_from(["chatbot", "--max-tokens", "many"]).is_err());
    }
}
