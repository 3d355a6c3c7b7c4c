/**
 * Chat Message Data Structure
 *
 * This module defines the Message struct posted to the chat endpoint
 * and relayed to every live WebSocket connection.
 *
 * The hub itself is payload-agnostic: WebSocket clients may send any
 * bytes they like. Messages that enter through HTTP are wrapped in this
 * envelope so that clients can tell who posted them and when.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Author used when a post does not name one
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// Represents a single chat message
///
/// # Fields
/// * `text` - The message content
/// * `author` - The author's name or identifier
/// * `timestamp` - ISO 8601 formatted timestamp (RFC3339)
///
/// # Example
/// ```rust
/// use devnest::shared::Message;
///
/// let message = Message::new(
///     "Hello, world!".to_string(),
///     "Alice".to_string()
/// );
/// assert_eq!(message.author, "Alice");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// The message text content
    pub text: String,
    /// The author's name
    pub author: String,
    /// ISO 8601 timestamp (RFC3339 format)
    pub timestamp: String,
}

impl Message {
    /// Create a new message with the current timestamp
    pub fn new(text: String, author: String) -> Self {
        Self {
            text,
            author,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Check that the message is non-empty and fits in `max_bytes` once encoded
    ///
    /// The limit applies to the JSON envelope that is actually broadcast,
    /// so an HTTP post can never produce a frame that a WebSocket client
    /// would not be allowed to send itself.
    pub fn validate(&self, max_bytes: usize) -> Result<(), SharedError> {
        if self.text.trim().is_empty() {
            return Err(SharedError::validation("text", "Message text cannot be empty"));
        }
        let encoded = self.to_payload()?;
        if encoded.len() > max_bytes {
            return Err(SharedError::message(format!(
                "Message is {} bytes, limit is {}",
                encoded.len(),
                max_bytes
            )));
        }
        Ok(())
    }

    /// Encode the message as the byte payload handed to the hub
    pub fn to_payload(&self) -> Result<Vec<u8>, SharedError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPost {
    /// Message text
    pub text: String,
    /// Optional author name; defaults to [`ANONYMOUS_AUTHOR`]
    #[serde(default)]
    pub author: Option<String>,
}

impl ChatPost {
    /// Stamp the post into a [`Message`]
    pub fn into_message(self) -> Message {
        let author = self
            .author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());
        Message::new(self.text, author)
    }
}
