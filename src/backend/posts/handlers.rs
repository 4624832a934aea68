//! Post HTTP Handlers
//!
//! Handlers for creating, reading, updating, and deleting posts, plus the
//! per-profile feed and the paginated follow timeline. Ownership checks use
//! the verified Bearer token; the original author can never be spoofed via
//! the request body.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::media::store::MediaStore;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::social::db::get_following_ids;
use crate::shared::social::post::MAX_DESCRIPTION_LEN;
use crate::shared::social::{CreatePostRequest, PageQuery, Post, TimelineResponse, UpdatePostRequest};

use super::db;

/// Create a post (POST /api/posts)
///
/// The caller becomes the author. An `image` that names an uploaded file is
/// inlined as a base64 data URL; URLs and data URLs pass through.
///
/// # Errors
///
/// * `400 Bad Request` - If the description exceeds 500 characters or the
///   referenced upload does not exist
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    if request.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ApiError::validation(format!(
            "description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }

    let image = inline_image(&state.media, &request.image).await?;

    let post = db::create_post(pool, auth.user_id, &request.description, &image).await?;

    tracing::info!("Post {} created by {}", post.id, auth.username);

    Ok(Json(post.to_shared()))
}

/// Get a single post (GET /api/posts/{id})
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let post = db::get_post_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    Ok(Json(post.to_shared()))
}

/// Update a post (PUT /api/posts/{id})
///
/// # Errors
///
/// * `403 Forbidden` - If the caller is not the author
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let post = db::get_post_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    if post.user_id != auth.user_id {
        return Err(ApiError::forbidden("you can only update your own post"));
    }

    if let Some(description) = request.description.as_deref() {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ApiError::validation(format!(
                "description exceeds {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }

    let image = match request.image.as_deref() {
        Some(image) => Some(inline_image(&state.media, image).await?),
        None => None,
    };

    let updated = db::update_post(pool, id, request.description.as_deref(), image.as_deref()).await?;

    Ok(Json(updated.to_shared()))
}

/// Delete a post (DELETE /api/posts/{id})
///
/// # Errors
///
/// * `403 Forbidden` - If the caller is not the author
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let post = db::get_post_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    if post.user_id != auth.user_id {
        return Err(ApiError::forbidden("you can only delete your own post"));
    }

    db::delete_post(pool, id).await?;

    tracing::info!("Post {} deleted by {}", id, auth.username);

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// All posts of one profile (GET /api/posts/profile/{username})
pub async fn get_profile_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let user = get_user_by_username(pool, &username)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let posts = db::get_posts_by_user(pool, user.id).await?;

    Ok(Json(posts.iter().map(|p| p.to_shared()).collect()))
}

/// Paginated timeline (GET /api/posts/timeline/{user_id}?page=&limit=)
///
/// Posts by the user and everyone they follow, newest first. One extra row
/// is fetched to decide whether another page exists.
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let pool = state.db_pool.as_ref().ok_or(ApiError::DatabaseUnavailable)?;

    let mut author_ids = get_following_ids(pool, user_id).await?;
    author_ids.push(user_id);

    let (page, limit, offset) = query.window();

    let mut records = db::get_timeline_page(pool, &author_ids, limit + 1, offset).await?;
    let has_more = records.len() as i64 > limit;
    records.truncate(limit as usize);

    Ok(Json(TimelineResponse {
        posts: records.iter().map(|p| p.to_shared()).collect(),
        page,
        has_more,
    }))
}

/// Inline an image reference, turning a missing upload into a 400
async fn inline_image(store: &MediaStore, image: &str) -> Result<String, ApiError> {
    match store.inline_as_data_url(image).await {
        Ok(inlined) => Ok(inlined),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::validation("referenced upload does not exist"))
        }
        Err(e) => Err(ApiError::Io(e)),
    }
}
