//! Database operations for chats and messages

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::social::{Chat, ChatMessage};

/// A chat row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatRecord {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    /// Project this record to its wire shape
    pub fn to_shared(&self) -> Chat {
        Chat {
            id: self.id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// A message row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Project this record to its wire shape
    pub fn to_shared(&self) -> ChatMessage {
        ChatMessage {
            id: self.id,
            chat_id: self.chat_id,
            sender_id: self.sender_id,
            body: self.body.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Find the chat between two users, in either order
pub async fn find_chat_between(
    pool: &PgPool,
    first_id: Uuid,
    second_id: Uuid,
) -> Result<Option<ChatRecord>, sqlx::Error> {
    let chat = sqlx::query_as::<_, ChatRecord>(
        r#"
        SELECT id, sender_id, receiver_id, created_at
        FROM chats
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        "#,
    )
    .bind(first_id)
    .bind(second_id)
    .fetch_optional(pool)
    .await?;

    Ok(chat)
}

/// Create a chat between two users
///
/// A unique index on the unordered pair backstops concurrent creation; a
/// unique violation means another request won the race, so the existing
/// chat is returned instead.
pub async fn create_chat(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
) -> Result<ChatRecord, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let inserted = sqlx::query_as::<_, ChatRecord>(
        r#"
        INSERT INTO chats (id, sender_id, receiver_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, sender_id, receiver_id, created_at
        "#,
    )
    .bind(id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(now)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(chat) => Ok(chat),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Lost the race; the pair now has a chat
            let existing = find_chat_between(pool, sender_id, receiver_id).await?;
            existing.ok_or(sqlx::Error::RowNotFound)
        }
        Err(e) => Err(e),
    }
}

/// Get a chat by ID
pub async fn get_chat_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ChatRecord>, sqlx::Error> {
    let chat = sqlx::query_as::<_, ChatRecord>(
        r#"
        SELECT id, sender_id, receiver_id, created_at
        FROM chats
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(chat)
}

/// All chats a user participates in, most recent first
pub async fn get_chats_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ChatRecord>, sqlx::Error> {
    let chats = sqlx::query_as::<_, ChatRecord>(
        r#"
        SELECT id, sender_id, receiver_id, created_at
        FROM chats
        WHERE sender_id = $1 OR receiver_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(chats)
}

/// Append a message to a chat
pub async fn create_message(
    pool: &PgPool,
    chat_id: Uuid,
    sender_id: Uuid,
    body: &str,
) -> Result<MessageRecord, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let message = sqlx::query_as::<_, MessageRecord>(
        r#"
        INSERT INTO messages (id, chat_id, sender_id, body, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, chat_id, sender_id, body, created_at
        "#,
    )
    .bind(id)
    .bind(chat_id)
    .bind(sender_id)
    .bind(body)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// One page of a chat's messages, oldest first
pub async fn get_messages_page(
    pool: &PgPool,
    chat_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<MessageRecord>, sqlx::Error> {
    let messages = sqlx::query_as::<_, MessageRecord>(
        r#"
        SELECT id, chat_id, sender_id, body, created_at
        FROM messages
        WHERE chat_id = $1
        ORDER BY created_at ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(chat_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
