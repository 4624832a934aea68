//! Public User Data Structure
//!
//! Represents a user profile as exposed to other users. Never carries the
//! password hash or email.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile as seen by other users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    /// Unique user ID
    pub id: Uuid,
    /// Username (unique)
    pub username: String,
    /// Profile picture: a data URL, an absolute URL, or an uploaded
    /// filename under `/images`; empty when unset
    pub profile_picture: String,
    /// Short self-description
    pub bio: Option<String>,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

impl PublicUser {
    /// Get avatar initial (first letter of username)
    pub fn avatar_initial(&self) -> char {
        self.username.chars().next().unwrap_or('?').to_ascii_uppercase()
    }
}

/// Request to update a user's own profile
///
/// All fields are optional; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUserRequest {
    /// New username
    pub username: Option<String>,
    /// New password (will be re-hashed before storage)
    pub password: Option<String>,
    /// New profile picture reference
    pub profile_picture: Option<String>,
    /// New bio
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_initial() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            profile_picture: String::new(),
            bio: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(user.avatar_initial(), 'A');
    }

    #[test]
    fn test_update_request_defaults_to_no_changes() {
        let request: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_none());
        assert!(request.password.is_none());
        assert!(request.profile_picture.is_none());
        assert!(request.bio.is_none());
    }
}
