/**
 * Backend Error Types
 *
 * This module defines the error type used by the domain HTTP handlers
 * (posts, chats, messages, profiles, media). Each variant maps to a fixed
 * HTTP status code and a client-visible message.
 *
 * # Error Categories
 *
 * - Request errors: validation failures, missing resources, ownership and
 *   uniqueness violations
 * - Service errors: the database being unconfigured or failing, I/O on the
 *   media directory
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend error type returned by domain handlers
///
/// # Usage
///
/// ```rust
/// use snapfeed::backend::error::ApiError;
///
/// let err = ApiError::forbidden("you can only update your own post");
/// assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request data
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// The caller is authenticated but not allowed to do this
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// The requested resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// A uniqueness or state conflict
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// The uploaded payload exceeds the allowed size
    #[error("Payload too large: {message}")]
    PayloadTooLarge {
        /// Human-readable error message
        message: String,
    },

    /// The database is not configured
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Unexpected server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message (logged, not sent to clients)
        message: String,
    },

    /// A database query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error in the media store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shared error (from the wire layer)
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new payload-too-large error
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `PayloadTooLarge` - 413 Payload Too Large
    /// - `DatabaseUnavailable` - 503 Service Unavailable
    /// - `Database` / `Io` / `Serialization` - 500 Internal Server Error
    /// - `Shared` - 400 for validation/event errors, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shared(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::EventError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-visible error message
    ///
    /// Internal errors (database, I/O, serialization) are collapsed to a
    /// generic message; the detail stays in the server logs.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::PayloadTooLarge { message } => message.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::Internal { .. } | Self::Database(_) | Self::Io(_) | Self::Serialization(_) => {
                "Internal server error".to_string()
            }
            Self::Shared(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ApiError::validation("description exceeds 500 characters");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "description exceeds 500 characters");
    }

    #[test]
    fn test_forbidden_error() {
        let error = ApiError::forbidden("you can only delete your own post");
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_error() {
        let error = ApiError::conflict("already following this user");
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_unavailable_maps_to_503() {
        assert_eq!(
            ApiError::DatabaseUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let error = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_from_shared_error() {
        let shared = SharedError::validation("body", "must not be empty");
        let error: ApiError = shared.into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
