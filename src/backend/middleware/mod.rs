//! Middleware Module
//!
//! This module contains request-processing middleware for the backend
//! server.
//!
//! # Architecture
//!
//! The middleware module currently provides:
//!
//! - **`auth`** - The `AuthUser` extractor that protects routes requiring
//!   a logged-in user

pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser};
