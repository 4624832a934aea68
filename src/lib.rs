//! Snapfeed - Main Library
//!
//! Snapfeed is a social photo-sharing service: user accounts, image posts,
//! follow relationships, and direct-message chat with a live presence and
//! message-relay layer over WebSockets.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - Public user/post/chat/message data structures
//!   - The WebSocket wire protocol (client and server events)
//!   - Shared error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, routes, and middleware
//!   - Authentication (bcrypt + JWT sessions)
//!   - PostgreSQL persistence via sqlx
//!   - The in-memory presence registry and point-to-point relay
//!
//! # Usage
//!
//! ```rust,no_run
//! use snapfeed::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Use app with an Axum server
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is thread-safe: the presence registry is guarded by a
//! mutex, per-connection delivery goes through `tokio::sync::mpsc` channels,
//! and the database pool is internally synchronized.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
