use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation entries kept per session.
pub const CHAT_LOG_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub message: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(message: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self::new(Sender::User, message, timestamp)
    }

    pub fn assistant(message: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self::new(Sender::Assistant, message, timestamp)
    }

    fn new(sender: Sender, message: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            sender,
            timestamp,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Ordered conversation log, oldest first. Appending beyond the limit
/// evicts from the front.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    entries: VecDeque<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.entries.push_back(message);
        while self.entries.len() > CHAT_LOG_LIMIT {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries.iter().cloned().collect()
    }
}
