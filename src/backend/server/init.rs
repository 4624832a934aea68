/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Load optional services (database) and the media directory
 * 2. Create the presence registry
 * 3. Create and configure the router
 *
 * # Presence State
 *
 * The presence registry is purely in-memory and starts empty on every
 * boot; clients re-register over the socket after a restart.
 */

use axum::Router;

use crate::backend::media::store::MediaStore;
use crate::backend::presence::registry::PresenceRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_cors_origin, load_database, load_media_dir};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// This function sets up the Axum HTTP server with:
/// - The database connection pool (if configured)
/// - The media store and static image serving
/// - The presence registry and WebSocket route
/// - Route configuration, CORS, and request tracing
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: the server continues, database-backed endpoints
///   answer 503
/// - Media directory creation failures: logged, uploads will fail with 500
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing Snapfeed backend server");

    // Step 1: Load optional services
    let db_pool = load_database().await;
    let media_root = load_media_dir().await;
    let cors_origin = load_cors_origin();

    // Step 2: Create the in-memory presence registry
    let presence = PresenceRegistry::new();

    tracing::info!("Presence registry initialized");

    // Step 3: Create app state
    let app_state = AppState {
        db_pool,
        presence,
        media: MediaStore::new(media_root),
    };

    // Step 4: Create router with all routes
    let app = create_router(app_state, cors_origin);

    tracing::info!("Router configured");

    app
}
