//! Chat Data Structure
//!
//! Represents a two-party conversation. There is at most one chat per
//! unordered pair of users.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a chat between two users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    /// Unique chat ID
    pub id: Uuid,
    /// The user who opened the chat
    pub sender_id: Uuid,
    /// The other participant
    pub receiver_id: Uuid,
    /// When the chat was created (RFC3339)
    pub created_at: String,
}

impl Chat {
    /// Whether the given user participates in this chat
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The other participant from the given user's point of view
    pub fn peer_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.sender_id == user_id {
            Some(self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(self.sender_id)
        } else {
            None
        }
    }
}

/// Request to open a chat with another user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatRequest {
    /// The other participant
    pub receiver_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(sender: Uuid, receiver: Uuid) -> Chat {
        Chat {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_has_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = chat(a, b);
        assert!(c.has_participant(a));
        assert!(c.has_participant(b));
        assert!(!c.has_participant(Uuid::new_v4()));
    }

    #[test]
    fn test_peer_of() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = chat(a, b);
        assert_eq!(c.peer_of(a), Some(b));
        assert_eq!(c.peer_of(b), Some(a));
        assert_eq!(c.peer_of(Uuid::new_v4()), None);
    }
}
