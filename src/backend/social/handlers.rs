//! User Profile and Follow HTTP Handlers
//!
//! Handlers for public profile lookups, profile updates, and the follow
//! graph. Mutating endpoints take the acting user from the verified Bearer
//! token, never from the request body.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bcrypt::{hash, DEFAULT_COST};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, get_user_by_username, update_user};
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::social::{PublicUser, UpdateUserRequest};

use super::db;

/// Query parameters for `GET /api/users`
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Look up by user ID
    pub user_id: Option<Uuid>,
    /// Look up by username
    pub username: Option<String>,
}

fn require_pool(pool: &Option<PgPool>) -> Result<&PgPool, ApiError> {
    pool.as_ref().ok_or(ApiError::DatabaseUnavailable)
}

/// Get a public profile by ID or username (GET /api/users)
///
/// # Errors
///
/// * `400 Bad Request` - If neither `user_id` nor `username` is given
/// * `404 Not Found` - If no such user exists
pub async fn get_user(
    State(pool): State<Option<PgPool>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<PublicUser>, ApiError> {
    let pool = require_pool(&pool)?;

    let user = match (query.user_id, query.username.as_deref()) {
        (Some(id), _) => get_user_by_id(pool, id).await?,
        (None, Some(name)) => get_user_by_username(pool, name).await?,
        (None, None) => {
            return Err(ApiError::validation("user_id or username is required"));
        }
    };

    let user = user.ok_or_else(|| ApiError::not_found("user not found"))?;
    Ok(Json(user.to_public()))
}

/// Update own profile (PUT /api/users/{id})
///
/// Only the account owner may update a profile; a password change is
/// re-hashed before storage.
///
/// # Errors
///
/// * `403 Forbidden` - If `{id}` is not the caller
/// * `409 Conflict` - If the new username is already taken
pub async fn update_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let pool = require_pool(&pool)?;

    if auth.user_id != id {
        return Err(ApiError::forbidden("you can only update your own account"));
    }

    if let Some(username) = request.username.as_deref() {
        if !crate::backend::auth::handlers::register::is_valid_username(username) {
            return Err(ApiError::validation("invalid username format"));
        }
        if let Some(existing) = get_user_by_username(pool, username).await? {
            if existing.id != id {
                return Err(ApiError::conflict("username already taken"));
            }
        }
    }

    let password_hash = match request.password.as_deref() {
        Some(password) if password.len() < 8 => {
            return Err(ApiError::validation("password must be at least 8 characters"));
        }
        Some(password) => Some(hash(password, DEFAULT_COST).map_err(|e| {
            ApiError::internal(format!("failed to hash password: {}", e))
        })?),
        None => None,
    };

    let user = update_user(
        pool,
        id,
        request.username.as_deref(),
        password_hash.as_deref(),
        request.profile_picture.as_deref(),
        request.bio.as_deref(),
    )
    .await?;

    tracing::info!("Profile updated for {}", user.username);

    Ok(Json(user.to_public()))
}

/// Follow a user (PUT /api/users/{id}/follow)
///
/// # Errors
///
/// * `400 Bad Request` - On self-follow
/// * `404 Not Found` - If the target user does not exist
/// * `409 Conflict` - If already following
pub async fn follow_user(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = require_pool(&pool)?;

    if auth.user_id == id {
        return Err(ApiError::validation("you cannot follow yourself"));
    }

    get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let created = db::follow(pool, auth.user_id, id).await?;
    if !created {
        return Err(ApiError::conflict("already following this user"));
    }

    tracing::info!("{} now follows {}", auth.user_id, id);

    Ok(Json(serde_json::json!({ "following": id })))
}

/// Unfollow a user (PUT /api/users/{id}/unfollow)
///
/// # Errors
///
/// * `409 Conflict` - If not currently following
pub async fn unfollow_user(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = require_pool(&pool)?;

    let removed = db::unfollow(pool, auth.user_id, id).await?;
    if !removed {
        return Err(ApiError::conflict("not following this user"));
    }

    tracing::info!("{} unfollowed {}", auth.user_id, id);

    Ok(Json(serde_json::json!({ "unfollowed": id })))
}

/// Get the users someone follows (GET /api/users/{id}/following)
///
/// The chat sidebar intersects this list with the presence snapshot to show
/// which friends are online.
pub async fn get_following(
    State(pool): State<Option<PgPool>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let pool = require_pool(&pool)?;

    let users = db::get_following(pool, id).await?;
    Ok(Json(users.iter().map(|u| u.to_public()).collect()))
}
