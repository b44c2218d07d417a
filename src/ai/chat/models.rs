//! The core models for managing a stateful chat with an LLM.
use crate::openai::{Message, Role};

pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// Ordered conversation history sent to the model on every turn.
///
/// The system message lives in its own slot rather than at a fixed
/// position in the turn list. When set, it is always emitted first by
/// `messages()` and is never touched by normal turn processing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    system: Option<Message>,
    turns: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_message(content: &str) -> Self {
        Self {
            system: Some(Message::new(Role::System, content)),
            turns: Vec::new(),
        }
    }

    /// Builds a transcript from a flat list of messages. Leading
    /// system messages fill the system slot, the last one wins.
    pub fn new_with_messages(messages: Vec<Message>) -> Self {
        let mut transcript = Self::new();
        let mut iter = messages.into_iter().peekable();
        while let Some(msg) = iter.next_if(|m| m.role == Role::System) {
            transcript.system = Some(msg);
        }
        transcript.turns.extend(iter);
        transcript
    }

    pub fn messages(&self) -> Vec<Message> {
        self.iter().cloned().collect()
    }

    pub fn push(&mut self, msg: Message) {
        self.turns.push(msg)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.system.iter().chain(self.turns.iter())
    }

    pub fn system_message(&self) -> Option<&Message> {
        self.system.as_ref()
    }

    /// Replaces the system message content, filling the slot if it is
    /// empty. Turns are left untouched.
    pub fn set_system_message(&mut self, content: &str) {
        match self.system.as_mut() {
            Some(msg) => msg.content = content.to_string(),
            None => self.system = Some(Message::new(Role::System, content)),
        }
    }

    /// Drops every turn and resets the system slot to `content`.
    pub fn reset(&mut self, content: &str) {
        *self = Self::with_system_message(content);
    }

    pub fn len(&self) -> usize {
        usize::from(self.system.is_some()) + self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
