//! Social Module
//!
//! Public profiles and follow relationships.
//!
//! # Architecture
//!
//! - **`db`** - Database operations for follow edges and profile lookups
//! - **`handlers`** - HTTP handlers for the `/api/users` endpoints
//!
//! # Endpoints
//!
//! - `GET /api/users?user_id=|username=` - Public profile lookup
//! - `PUT /api/users/{id}` - Update own profile
//! - `PUT /api/users/{id}/follow` - Follow a user
//! - `PUT /api/users/{id}/unfollow` - Unfollow a user
//! - `GET /api/users/{id}/following` - Users someone follows

/// Database operations for follows and profiles
pub mod db;

/// HTTP handlers for user endpoints
pub mod handlers;

pub use handlers::{follow_user, get_following, get_user, unfollow_user, update_profile};
