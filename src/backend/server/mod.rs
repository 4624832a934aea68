//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server. It provides the foundation for the application's
//! backend infrastructure.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and validation
//! - **`init`** - Server initialization and app creation
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: Reads the environment (port, database,
//!    media directory, CORS origin)
//! 2. **State Creation**: Creates the presence registry and media store
//! 3. **Router Creation**: Configures all routes and middleware
//!
//! # State Management
//!
//! The server uses `AppState` as the central state container, which holds:
//! - The optional PostgreSQL connection pool
//! - The presence registry (user <-> connection mapping)
//! - The media store (upload directory)

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::create_app;
pub use state::AppState;
