//! Conversation and message types for the mock chat.
//!
//! A [`Conversation`] is an append-only sequence of [`Message`]s between the
//! local user and a single counterpart. Messages can only be added through
//! the controller, never edited or removed.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for messages authored by the local user.
pub const LOCAL_USER_LABEL: &str = "You";

/// Identifier of a conversation (e.g. `"1"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a conversation id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a message, unique and increasing within its conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person operating the client.
    LocalUser,
    /// The other side of the conversation, by display name.
    Counterpart(String),
}

impl Sender {
    /// The label rendered next to the message.
    pub fn label(&self) -> &str {
        match self {
            Self::LocalUser => LOCAL_USER_LABEL,
            Self::Counterpart(name) => name,
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: MessageId,
    /// Text exactly as submitted.
    pub text: String,
    /// Author of the message.
    pub sender: Sender,
    /// Local time the message was created, pre-formatted.
    pub timestamp: String,
}

impl Message {
    /// Create a message.
    pub fn new(
        id: MessageId,
        text: impl Into<String>,
        sender: Sender,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: timestamp.into(),
        }
    }

    /// Whether the local user wrote this message.
    pub fn is_local(&self) -> bool {
        self.sender == Sender::LocalUser
    }
}

/// Format a local time as a 12-hour clock with zero-padded fields, e.g. `03:07 PM`.
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%I:%M %p").to_string()
}

/// A named thread of messages with one counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation id.
    pub id: ConversationId,
    /// Counterpart display name.
    pub name: String,
    /// Avatar URI.
    pub avatar: String,
    /// Messages, oldest first.
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new(
        id: impl Into<ConversationId>,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
            messages: Vec::new(),
        }
    }

    /// Seed the conversation with existing messages.
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Messages in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Id of the most recent message, if any.
    pub fn last_id(&self) -> Option<MessageId> {
        self.messages.last().map(|m| m.id)
    }

    /// The sender used for replies in this conversation.
    pub fn counterpart(&self) -> Sender {
        Sender::Counterpart(self.name.clone())
    }

    /// Summary row for the conversation list.
    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            preview: self
                .last_message()
                .map(|m| m.text.clone())
                .unwrap_or_default(),
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub name: String,
    pub avatar: String,
    /// Text of the last message, empty when there is none.
    pub preview: String,
}
