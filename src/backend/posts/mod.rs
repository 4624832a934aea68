//! Posts Module
//!
//! Image posts: creation with base64 inlining of uploaded files, single
//! post lookup, owner-only update/delete, per-profile feed, and the
//! paginated follow timeline.
//!
//! # Architecture
//!
//! - **`db`** - Database operations for posts
//! - **`handlers`** - HTTP handlers for the `/api/posts` endpoints

/// Database operations for posts
pub mod db;

/// HTTP handlers for post endpoints
pub mod handlers;

pub use handlers::{create_post, delete_post, get_post, get_profile_posts, get_timeline, update_post};
