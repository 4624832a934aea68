//! Presence Module
//!
//! The presence-tracking and message-relay layer. A WebSocket endpoint
//! keeps an in-memory bidirectional mapping of logged-in users to live
//! connections, broadcasts presence changes to everyone, and routes
//! point-to-point chat messages between online peers.
//!
//! # Architecture
//!
//! - **`registry`** - The `user_id <-> connection` map, snapshot
//!   broadcasting, and point-to-point delivery
//! - **`socket`** - The WebSocket handler: upgrade, per-connection writer
//!   task, event loop, disconnect cleanup
//!
//! # Delivery Semantics
//!
//! Best effort, fire and forget: a message to an offline peer is dropped
//! (the REST message store is the durable path). There is no queueing, no
//! acknowledgment, and no retry.
//!
//! # Reconnect Churn
//!
//! A user who reconnects replaces their stale connection in the registry.
//! The stale connection's later disconnect does not evict the fresh one:
//! removal is guarded by the connection ID that registered the entry.

/// Presence registry
pub mod registry;

/// WebSocket handler
pub mod socket;

pub use registry::{ConnectionId, PresenceRegistry};
pub use socket::handle_socket_upgrade;
