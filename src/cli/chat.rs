use anyhow::{Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::ChatBuilder;
use crate::core::AppConfig;

/// A line entered at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Quit,
    Clear,
    System(&'a str),
    Empty,
    Message(&'a str),
}

pub fn parse_input(line: &str) -> Input<'_> {
    if line == "quit" {
        Input::Quit
    } else if line == "clear" {
        Input::Clear
    } else if let Some(text) = line.strip_prefix("system ") {
        Input::System(text)
    } else if line.is_empty() {
        Input::Empty
    } else {
        Input::Message(line)
    }
}

fn prompt_api_key(rl: &mut DefaultEditor) -> Result<String> {
    let api_key = match rl.readline("Enter your OpenAI API key: ") {
        Ok(line) => line.trim().to_string(),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => String::new(),
        Err(err) => return Err(err.into()),
    };

    if api_key.is_empty() {
        bail!("API key is required!");
    }

    Ok(api_key)
}

pub fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("OpenAI Chatbot");
    println!("==============");

    let api_key = match config.openai_api_key {
        Some(key) => key,
        None => prompt_api_key(&mut rl)?,
    };

    let mut chat = ChatBuilder::new(&config.openai_api_hostname, &api_key, &config.openai_model)
        .max_tokens(config.max_tokens)
        .temperature(config.temperature)
        .system_message(&config.system_message)
        .build()?;

    println!("\nChatbot initialized! Type 'quit' to exit, 'clear' to clear history.");
    println!("You can also type 'system <message>' to set a system message.");
    println!("\nStart chatting:");

    loop {
        println!();
        let readline = rl.readline("You: ");
        match readline {
            Ok(line) => {
                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Clear => {
                        chat.reset_history();
                        println!("Conversation history cleared!");
                    }
                    Input::System(text) => {
                        chat.set_system_prompt(text);
                        println!("System message set!");
                    }
                    Input::Empty => continue,
                    Input::Message(text) => {
                        let reply = chat.send_turn(text);
                        println!("Assistant: {}", reply);
                    }
                }
                rl.add_history_entry(line.as_str())?;
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
