//! Post Data Structure
//!
//! Represents an image post in the feed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a post description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Represents an image post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique post ID
    pub id: Uuid,
    /// Author user ID
    pub user_id: Uuid,
    /// Post description (at most 500 characters, may be empty)
    pub description: String,
    /// Image payload: a base64 data URL, an absolute URL, or empty
    pub image: String,
    /// When the post was created (RFC3339)
    pub created_at: String,
    /// When the post was last updated (RFC3339)
    pub updated_at: String,
}

/// Request to create a post
///
/// `image` may be empty, an absolute URL, a data URL, or the filename of a
/// previously uploaded file; bare filenames are inlined as base64 data URLs
/// at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// Post description
    #[serde(default)]
    pub description: String,
    /// Image reference
    #[serde(default)]
    pub image: String,
}

/// Request to update a post
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePostRequest {
    /// New description
    pub description: Option<String>,
    /// New image reference
    pub image: Option<String>,
}

/// Response for the paginated timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    /// Posts for the requested page, newest first
    pub posts: Vec<Post>,
    /// Page number that was served (1-based)
    pub page: u32,
    /// Whether another page exists
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let request: CreatePostRequest = serde_json::from_str("{}").unwrap();
        assert!(request.description.is_empty());
        assert!(request.image.is_empty());
    }

    #[test]
    fn test_post_roundtrip() {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: "sunset".to_string(),
            image: "data:image/jpeg;base64,AAAA".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(post, back);
    }
}
