//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation and route assembly (layers, static
//!   files, fallback)
//! - **`api_routes`** - JSON API endpoints (auth, users, posts, upload,
//!   chats, messages)
//!
//! # Route Types
//!
//! ## API Routes
//!
//! - `POST /api/auth/register` - User registration
//! - `POST /api/auth/login` - User login
//! - `GET /api/auth/me` - Get current user
//! - `GET/PUT /api/users...` - Profiles and follows
//! - `POST/GET/PUT/DELETE /api/posts...` - Posts, profile feed, timeline
//! - `POST /api/upload` - Image upload
//! - `POST/GET /api/chats...`, `/api/messages...` - Chats and messages
//!
//! ## Realtime
//!
//! - `GET /ws` - WebSocket presence and relay channel
//!
//! ## Static Files
//!
//! - `GET /images/{filename}` - Uploaded images

/// Main router creation
pub mod router;

/// API endpoint configuration
pub mod api_routes;

pub use router::create_router;
