//! Chat and Message HTTP Handlers
//!
//! REST handlers for opening chats and reading/writing durable messages.
//! Only chat participants may read or append; the sender is always the
//! verified caller.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::shared::social::{
    Chat, CreateChatRequest, ListMessagesResponse, PageQuery, SendChatMessageRequest,
};

use super::db;

fn require_pool(pool: &Option<PgPool>) -> Result<&PgPool, ApiError> {
    pool.as_ref().ok_or(ApiError::DatabaseUnavailable)
}

/// Open a chat with another user (POST /api/chats)
///
/// Idempotent per user pair: if a chat between the caller and the receiver
/// already exists (in either direction), it is returned as-is.
///
/// # Errors
///
/// * `400 Bad Request` - On a chat with yourself
/// * `404 Not Found` - If the receiver does not exist
pub async fn create_chat(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateChatRequest>,
) -> Result<Json<Chat>, ApiError> {
    let pool = require_pool(&pool)?;

    if request.receiver_id == auth.user_id {
        return Err(ApiError::validation("you cannot open a chat with yourself"));
    }

    get_user_by_id(pool, request.receiver_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    if let Some(existing) = db::find_chat_between(pool, auth.user_id, request.receiver_id).await? {
        return Ok(Json(existing.to_shared()));
    }

    let chat = db::create_chat(pool, auth.user_id, request.receiver_id).await?;

    tracing::info!(
        "Chat {} opened between {} and {}",
        chat.id,
        auth.user_id,
        request.receiver_id
    );

    Ok(Json(chat.to_shared()))
}

/// All chats of a user (GET /api/chats/{user_id})
pub async fn get_user_chats(
    State(pool): State<Option<PgPool>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Chat>>, ApiError> {
    let pool = require_pool(&pool)?;

    let chats = db::get_chats_for_user(pool, user_id).await?;
    Ok(Json(chats.iter().map(|c| c.to_shared()).collect()))
}

/// The chat between two users, or null
/// (GET /api/chats/find/{first_id}/{second_id})
pub async fn find_chat(
    State(pool): State<Option<PgPool>>,
    Path((first_id, second_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Option<Chat>>, ApiError> {
    let pool = require_pool(&pool)?;

    let chat = db::find_chat_between(pool, first_id, second_id).await?;
    Ok(Json(chat.map(|c| c.to_shared())))
}

/// Store a message (POST /api/messages)
///
/// # Errors
///
/// * `400 Bad Request` - On an empty body
/// * `403 Forbidden` - If the caller is not a chat participant
/// * `404 Not Found` - If the chat does not exist
pub async fn send_message(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<SendChatMessageRequest>,
) -> Result<Json<crate::shared::social::ChatMessage>, ApiError> {
    let pool = require_pool(&pool)?;

    if request.body.trim().is_empty() {
        return Err(ApiError::validation("message body must not be empty"));
    }

    let chat = db::get_chat_by_id(pool, request.chat_id)
        .await?
        .ok_or_else(|| ApiError::not_found("chat not found"))?;

    if chat.sender_id != auth.user_id && chat.receiver_id != auth.user_id {
        return Err(ApiError::forbidden("you are not a participant of this chat"));
    }

    let message = db::create_message(pool, request.chat_id, auth.user_id, &request.body).await?;

    Ok(Json(message.to_shared()))
}

/// One page of a chat's messages (GET /api/messages/{chat_id}?page=&limit=)
///
/// Oldest first; one extra row is fetched to decide whether another page
/// exists.
///
/// # Errors
///
/// * `403 Forbidden` - If the caller is not a chat participant
/// * `404 Not Found` - If the chat does not exist
pub async fn get_chat_messages(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(chat_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let pool = require_pool(&pool)?;

    let chat = db::get_chat_by_id(pool, chat_id)
        .await?
        .ok_or_else(|| ApiError::not_found("chat not found"))?;

    if chat.sender_id != auth.user_id && chat.receiver_id != auth.user_id {
        return Err(ApiError::forbidden("you are not a participant of this chat"));
    }

    let (page, limit, offset) = query.window();

    let mut records = db::get_messages_page(pool, chat_id, limit + 1, offset).await?;
    let has_more = records.len() as i64 > limit;
    records.truncate(limit as usize);

    Ok(Json(ListMessagesResponse {
        messages: records.iter().map(|m| m.to_shared()).collect(),
        page,
        has_more,
    }))
}
