//! Authentication test helpers

use snapfeed::backend::auth::sessions::create_token;
use uuid::Uuid;

/// Build a Bearer header value for an arbitrary user
pub fn bearer_for(user_id: Uuid, username: &str) -> String {
    let token = create_token(user_id, username.to_string()).expect("Failed to create test token");
    format!("Bearer {}", token)
}
