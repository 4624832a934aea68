//! Media Module
//!
//! Image uploads and base64 inlining.
//!
//! # Architecture
//!
//! - **`store`** - Filesystem-backed media store (timestamped filenames,
//!   data-URL encoding)
//! - **`handlers`** - HTTP handler for `POST /api/upload`
//!
//! Stored files are served back under `/images` by the router's static
//! file service.

/// Filesystem-backed media store
pub mod store;

/// HTTP handler for uploads
pub mod handlers;

pub use handlers::upload;
pub use store::MediaStore;
