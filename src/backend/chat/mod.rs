//! Chat Module
//!
//! Two-party chats and their durable messages. This is the REST side of
//! messaging; the live relay between online peers lives in
//! [`crate::backend::presence`].
//!
//! # Architecture
//!
//! - **`db`** - Database operations for chats and messages
//! - **`handlers`** - HTTP handlers for `/api/chats` and `/api/messages`

/// Database operations for chats and messages
pub mod db;

/// HTTP handlers for chat endpoints
pub mod handlers;

pub use handlers::{create_chat, find_chat, get_chat_messages, get_user_chats, send_message};
