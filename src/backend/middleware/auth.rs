/**
 * Authentication Middleware
 *
 * Verifies the `Authorization: Bearer <jwt>` header and makes the caller's
 * identity available to handlers as [`AuthenticatedUser`].
 *
 * Two entry points share the same verification:
 * - [`auth_middleware`] guards whole routers and rejects early
 * - [`AuthUser`] is an extractor for handlers on mixed public/private paths;
 *   it reuses the middleware's result when present and verifies the header
 *   itself otherwise
 */

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::JwtConfig;
use crate::backend::error::BackendError;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub username: Option<String>,
}

/// Verify the bearer token in `headers`
pub fn authenticate(headers: &HeaderMap, jwt: &JwtConfig) -> Result<AuthenticatedUser, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing Authorization header");
            BackendError::unauthorized("Missing Authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("[Auth] Invalid Authorization header format");
        BackendError::unauthorized("Invalid Authorization header format")
    })?;

    let claims = jwt.verify_token(token.trim())?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("[Auth] Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
        username: claims.username,
    })
}

/// Authentication middleware
///
/// 1. Extracts the JWT from the Authorization header
/// 2. Verifies it with the configured secret
/// 3. Attaches [`AuthenticatedUser`] to the request extensions
///
/// Responds 401 if the token is missing or invalid.
pub async fn auth_middleware(
    State(jwt): State<JwtConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(request.headers(), &jwt)?;
    tracing::debug!("[Auth] Authenticated {}", user.user_id);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtConfig: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let jwt = JwtConfig::from_ref(state);
        authenticate(&parts.headers, &jwt).map(AuthUser)
    }
}
