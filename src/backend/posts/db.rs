//! Database operations for posts

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::social::Post;

/// A post row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostRecord {
    /// Project this record to its wire shape
    pub fn to_shared(&self) -> Post {
        Post {
            id: self.id,
            user_id: self.user_id,
            description: self.description.clone(),
            image: self.image.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}

const POST_COLUMNS: &str = "id, user_id, description, image, created_at, updated_at";

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    description: &str,
    image: &str,
) -> Result<PostRecord, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let post = sqlx::query_as::<_, PostRecord>(&format!(
        r#"
        INSERT INTO posts (id, user_id, description, image, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(description)
    .bind(image)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Get a post by ID
pub async fn get_post_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PostRecord>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostRecord>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Update a post's description and/or image
///
/// Absent fields are left untouched.
pub async fn update_post(
    pool: &PgPool,
    id: Uuid,
    description: Option<&str>,
    image: Option<&str>,
) -> Result<PostRecord, sqlx::Error> {
    let now = Utc::now();

    let post = sqlx::query_as::<_, PostRecord>(&format!(
        r#"
        UPDATE posts
        SET description = COALESCE($1, description),
            image = COALESCE($2, image),
            updated_at = $3
        WHERE id = $4
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(description)
    .bind(image)
    .bind(now)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Delete a post
pub async fn delete_post(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// All posts by one user, newest first
pub async fn get_posts_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostRecord>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// One timeline page: posts by any of the given authors, newest first
pub async fn get_timeline_page(
    pool: &PgPool,
    author_ids: &[Uuid],
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostRecord>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts
        WHERE user_id = ANY($1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(author_ids)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
