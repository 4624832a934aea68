/**
 * Authentication Middleware
 *
 * This module provides the extractor that protects routes requiring user
 * authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the user identity to handlers.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;

/// Authenticated user data extracted from a JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Extract and verify the Bearer token from request headers
///
/// 1. Reads the Authorization header (format: "Bearer <token>")
/// 2. Verifies the token signature and expiry
/// 3. Parses the user ID from the token claims
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub fn authenticate(headers: &HeaderMap) -> Result<AuthenticatedUser, StatusCode> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    Ok(AuthenticatedUser {
        user_id,
        username: claims.username,
    })
}

/// Axum extractor for the authenticated user
///
/// This can be used as a parameter in handlers to require a valid Bearer
/// token and obtain the caller's identity.
///
/// ```rust,no_run
/// use snapfeed::backend::middleware::AuthUser;
/// use axum::Json;
///
/// async fn handler(AuthUser(user): AuthUser) -> Json<String> {
///     Json(user.username)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticate(&parts.headers)?;
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::create_token;

    #[test]
    fn test_authenticate_success() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, "alice".to_string()).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());

        let user = authenticate(&headers).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_authenticate_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(authenticate(&headers).unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_not_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(authenticate(&headers).unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_garbage_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer not.a.token".parse().unwrap());
        assert_eq!(authenticate(&headers).unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
