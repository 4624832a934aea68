//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP
//! responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, etc.)
//!
//! # HTTP Response Conversion
//!
//! `ApiError` implements `IntoResponse` from Axum, allowing it to be
//! returned directly from handlers. The error is automatically converted to
//! an appropriate HTTP status code and JSON response body.
//!
//! # Example
//!
//! ```rust,no_run
//! use snapfeed::backend::error::ApiError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, ApiError> {
//!     Err(ApiError::not_found("post not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
