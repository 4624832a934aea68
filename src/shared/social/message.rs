//! Chat Message Data Structure
//!
//! Represents a persisted message in a conversation. The socket relay path
//! uses [`crate::shared::event::ServerEvent::Message`] instead; this type is
//! the durable REST shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a stored chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: Uuid,
    /// Chat this message belongs to
    pub chat_id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// Message text
    pub body: String,
    /// When the message was stored (RFC3339)
    pub created_at: String,
}

impl ChatMessage {
    /// Get a preview of the message (first `max_len` characters)
    pub fn preview(&self, max_len: usize) -> String {
        if self.body.chars().count() <= max_len {
            self.body.clone()
        } else {
            let mut preview: String = self.body.chars().take(max_len.saturating_sub(3)).collect();
            preview.push_str("...");
            preview
        }
    }
}

/// Request to store a message in a chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendChatMessageRequest {
    /// Chat to append to
    pub chat_id: Uuid,
    /// Message text
    pub body: String,
}

/// Response for listing the messages of a chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    /// Messages for the requested page, oldest first
    pub messages: Vec<ChatMessage>,
    /// Page number that was served (1-based)
    pub page: u32,
    /// Whether another page exists
    pub has_more: bool,
}
