/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration:
 * the optional PostgreSQL connection, the media directory, and the CORS
 * origin.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development when possible.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Services that fail to initialize are set to `None` and the server
 * continues without them.
 */

use sqlx::PgPool;
use std::path::PathBuf;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if `DATABASE_URL` is not set or the connection fails
///
/// # Errors
///
/// Errors are logged but do not prevent server startup. The function
/// returns `None` on any error, allowing the server to run without
/// database features (those endpoints answer 503).
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    // Run migrations
    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Load the media directory for uploaded images
///
/// Reads `MEDIA_DIR` (default `public/images`) and creates the directory
/// if it does not exist yet.
pub async fn load_media_dir() -> PathBuf {
    let dir = std::env::var("MEDIA_DIR").unwrap_or_else(|_| "public/images".to_string());
    let path = PathBuf::from(dir);

    if let Err(e) = tokio::fs::create_dir_all(&path).await {
        tracing::error!("Failed to create media directory {:?}: {:?}", path, e);
    } else {
        tracing::info!("Media directory ready at {:?}", path);
    }

    path
}

/// Load the allowed CORS origin
///
/// Returns the exact origin from `CORS_ORIGIN`, or `None` when unset
/// (the router then allows any origin, for development).
pub fn load_cors_origin() -> Option<String> {
    match std::env::var("CORS_ORIGIN") {
        Ok(origin) if !origin.is_empty() => {
            tracing::info!("CORS restricted to origin {}", origin);
            Some(origin)
        }
        _ => {
            tracing::warn!("CORS_ORIGIN not set. Allowing any origin (development mode).");
            None
        }
    }
}
