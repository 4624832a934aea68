//! Social Module
//!
//! This module contains the data structures for the social feed and chat:
//!
//! - `PublicUser` - A user profile as exposed to other users
//! - `Post` - An image post in the feed
//! - `Chat` - A two-party conversation
//! - `ChatMessage` - A message in a conversation
//!
//! # Usage
//!
//! ```rust
//! use snapfeed::shared::social::{PublicUser, Post, Chat, ChatMessage};
//! ```

pub mod chat;
pub mod message;
pub mod post;
pub mod user;

use serde::{Deserialize, Serialize};

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for paginated listings (`?page=&limit=`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Page size (default 20, capped at 100)
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Resolve to a `(page, limit, offset)` window with defaults applied
    pub fn window(&self) -> (u32, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = i64::from(page - 1) * i64::from(limit);
        (page, i64::from(limit), offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults() {
        let (page, limit, offset) = PageQuery::default().window();
        assert_eq!((page, limit, offset), (1, 20, 0));
    }

    #[test]
    fn test_window_caps_limit() {
        let query = PageQuery {
            page: Some(3),
            limit: Some(1000),
        };
        let (page, limit, offset) = query.window();
        assert_eq!((page, limit, offset), (3, 100, 200));
    }

    #[test]
    fn test_window_clamps_zero_page() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(10),
        };
        let (page, _, offset) = query.window();
        assert_eq!(page, 1);
        assert_eq!(offset, 0);
    }
}

// Re-export all types
pub use chat::{Chat, CreateChatRequest};
pub use message::{ChatMessage, ListMessagesResponse, SendChatMessageRequest};
pub use post::{CreatePostRequest, Post, TimelineResponse, UpdatePostRequest};
pub use user::{PublicUser, UpdateUserRequest};
