/**
 * WebSocket Wire Protocol
 *
 * This module defines the events exchanged over the persistent WebSocket
 * channel: registration and relay requests from clients, presence snapshots
 * and relayed messages from the server.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event sent by a client over the socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Bind this connection to a logged-in user
    AddUser {
        /// The user this connection belongs to
        user_id: Uuid,
    },
    /// Ask the server to relay a chat message to another user
    SendMessage {
        /// Recipient user ID
        receiver_id: Uuid,
        /// Chat the message belongs to
        chat_id: Uuid,
        /// Message text
        body: String,
    },
}

/// Event sent by the server over the socket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full snapshot of currently online users, broadcast on every
    /// connect and disconnect
    OnlineUsers {
        /// IDs of all users with a live connection
        users: Vec<Uuid>,
    },
    /// A chat message relayed point-to-point from an online sender
    Message {
        /// The user who sent the message
        sender_id: Uuid,
        /// Chat the message belongs to
        chat_id: Uuid,
        /// Message text
        body: String,
        /// When the server relayed the message (RFC3339)
        sent_at: String,
    },
}

impl ServerEvent {
    /// Create a presence snapshot event
    pub fn online_users(users: Vec<Uuid>) -> Self {
        Self::OnlineUsers { users }
    }

    /// Create a relayed message event stamped with the current time
    pub fn message(sender_id: Uuid, chat_id: Uuid, body: String) -> Self {
        Self::Message {
            sender_id,
            chat_id,
            body,
            sent_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
