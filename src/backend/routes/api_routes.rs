/**
 * API Route Configuration
 *
 * This module wires up all JSON API endpoints:
 * - Authentication (register, login, get current user)
 * - Profiles and the follow graph
 * - Posts, the profile feed, and the paginated timeline
 * - Image upload
 * - Chats and durable messages
 *
 * # Authentication
 *
 * Mutating routes require a JWT in the `Authorization` header (enforced by
 * the `AuthUser` extractor in each handler). Read-only lookups are public:
 * - `/api/auth/register`, `/api/auth/login` - Public by definition
 * - `GET /api/users`, `GET /api/posts/...`, `GET /api/chats/...` - Public
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::chat::{create_chat, find_chat, get_chat_messages, get_user_chats, send_message};
use crate::backend::media::upload;
use crate::backend::posts::{
    create_post, delete_post, get_post, get_profile_posts, get_timeline, update_post,
};
use crate::backend::server::state::AppState;
use crate::backend::social::{follow_user, get_following, get_user, unfollow_user, update_profile};

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
        // User profile and follow endpoints
        .route("/api/users", get(get_user))
        .route("/api/users/{id}", put(update_profile))
        .route("/api/users/{id}/follow", put(follow_user))
        .route("/api/users/{id}/unfollow", put(unfollow_user))
        .route("/api/users/{id}/following", get(get_following))
        // Post endpoints
        .route("/api/posts", post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/posts/profile/{username}", get(get_profile_posts))
        .route("/api/posts/timeline/{user_id}", get(get_timeline))
        // Upload endpoint
        .route("/api/upload", post(upload))
        // Chat endpoints
        .route("/api/chats", post(create_chat))
        .route("/api/chats/find/{first_id}/{second_id}", get(find_chat))
        .route("/api/chats/{user_id}", get(get_user_chats))
        // Message endpoints
        .route("/api/messages", post(send_message))
        .route("/api/messages/{chat_id}", get(get_chat_messages))
}
