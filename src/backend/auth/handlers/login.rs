/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username, or by email when the identifier contains '@'
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown user and wrong password both return 401 with the same message
 * - User passwords are never returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::JwtConfig;
use crate::backend::auth::users::{get_user_by_email, get_user_by_username};
use crate::backend::error::BackendError;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "ada",
///   "password": "analytical"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": "123e4567-e89b-12d3-a456-426614174000", "username": "ada", ... }
/// }
/// ```
pub async fn login(
    State(pool): State<Option<PgPool>>,
    State(jwt): State<JwtConfig>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;

    tracing::info!("[Auth] Login request for: {}", request.username);

    let user = if request.username.contains('@') {
        get_user_by_email(&pool, &request.username).await?
    } else {
        get_user_by_username(&pool, &request.username).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("[Auth] User not found: {}", request.username);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("[Auth] Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = jwt
        .create_token(user.id, &user.email, &user.username)
        .map_err(|e| {
            tracing::error!("[Auth] Failed to create token: {:?}", e);
            BackendError::internal("Server error")
        })?;

    tracing::info!("[Auth] User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
