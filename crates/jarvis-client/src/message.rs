//! Conversation message types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing prompts.
    User,
    /// The agent backend.
    Assistant,
}

/// Metadata attached to an assistant message, reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Backend job identifier.
    pub job_id: Option<String>,
    /// Total processing time in milliseconds.
    pub processing_time_ms: Option<u64>,
    /// Agent that produced the final response.
    pub agent: Option<String>,
    /// Whether the backend considers the job complete.
    pub is_completed: bool,
    /// Number of internal iterations the backend performed.
    pub total_iterations: Option<u64>,
    /// Ordered agents the job traversed.
    pub agent_chain: Vec<String>,
}

/// A single message in the conversation.
///
/// Messages are immutable once created; the list they live in is
/// append-only apart from the atomic clear-to-greeting reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Session-unique identifier, allocated by the owning conversation.
    pub id: u64,
    /// Message author.
    pub sender: Sender,
    /// Body text. Assistant content may contain markdown.
    pub content: String,
    /// When the message was created.
    pub timestamp: DateTime<Local>,
    /// Whether this message represents a failed request.
    #[serde(default)]
    pub is_error: bool,
    /// Backend metadata (assistant messages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    /// Create a user message.
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::User,
            content: content.into(),
            timestamp: Local::now(),
            is_error: false,
            metadata: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::Assistant,
            content: content.into(),
            timestamp: Local::now(),
            is_error: false,
            metadata: None,
        }
    }

    /// Create an assistant error message (fixed apology, error styling).
    pub fn error(id: u64, content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(id, content)
        }
    }

    /// Attach backend metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether this is a user message.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user(1, "Hello");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.content, "Hello");
        assert!(!user.is_error);
        assert!(user.metadata.is_none());

        let assistant = Message::assistant(2, "Hi there!");
        assert_eq!(assistant.sender, Sender::Assistant);
        assert!(!assistant.is_user());

        let error = Message::error(3, "Sorry");
        assert!(error.is_error);
        assert_eq!(error.sender, Sender::Assistant);
    }

    #[test]
    fn test_with_metadata() {
        let metadata = MessageMetadata {
            agent: Some("research".into()),
            is_completed: true,
            ..MessageMetadata::default()
        };
        let msg = Message::assistant(1, "done").with_metadata(metadata);
        let meta = msg.metadata.unwrap();
        assert_eq!(meta.agent.as_deref(), Some("research"));
        assert!(meta.is_completed);
    }
}
