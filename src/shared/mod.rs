//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are used for serialization and
//! communication over the JSON REST API and the WebSocket channel.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for serialization
//! and transmission over HTTP.

/// WebSocket wire protocol events
pub mod event;

/// Shared error types
pub mod error;

/// Social data structures (users, posts, chats, messages)
pub mod social;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use event::{ClientEvent, ServerEvent};
pub use social::{Chat, ChatMessage, Post, PublicUser};
