/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The optional PostgreSQL connection pool
 * - The presence registry (user <-> connection mapping for the relay)
 * - The media store (upload directory)
 *
 * # Thread Safety
 *
 * All state is designed to be thread-safe:
 * - `PresenceRegistry` guards its maps with a mutex and hands out
 *   cloneable mpsc senders per connection
 * - `PgPool` is internally synchronized
 * - `MediaStore` is an immutable path wrapper
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`. This follows
 * Axum's recommended pattern for state management.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::media::store::MediaStore;
use crate::backend::presence::registry::PresenceRegistry;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - Optional PostgreSQL database connection pool
/// * `presence` - In-memory presence registry for the WebSocket relay
/// * `media` - Media store for uploaded images
///
/// # Usage
///
/// ```rust
/// use snapfeed::backend::server::state::AppState;
/// use axum::extract::State;
///
/// async fn handler(State(state): State<AppState>) {
///     let online = state.presence.online_users();
///     // ...
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if the
    /// `DATABASE_URL` environment variable is not set). Handlers should
    /// check for `None` before using the database.
    pub db_pool: Option<PgPool>,

    /// Presence registry for the WebSocket relay
    ///
    /// Maintains the bidirectional `user_id <-> connection` mapping,
    /// broadcasts presence snapshots, and routes point-to-point messages
    /// between online peers.
    pub presence: PresenceRegistry,

    /// Media store for uploaded images
    pub media: MediaStore,
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for PresenceRegistry
///
/// This allows Axum handlers to extract the presence registry directly
/// from `AppState`.
impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

/// Implement FromRef for MediaStore
///
/// This allows Axum handlers to extract the media store directly from
/// `AppState`.
impl FromRef<AppState> for MediaStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media.clone()
    }
}
