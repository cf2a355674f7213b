use chrono::{DateTime, Utc};

use crate::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One turn of the conversation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

/// Append-only conversation history; `clear` is the only way to shrink it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail and returns the new message's index.
    pub fn append(&mut self, message: Message) -> Result<usize, ChatError> {
        if message.sender == Sender::User && message.content.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        Ok(self.push(message))
    }

    /// Appends without the blank-input check. For tutor replies and the
    /// seeded transcript, which never come from the input box.
    pub(crate) fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}
