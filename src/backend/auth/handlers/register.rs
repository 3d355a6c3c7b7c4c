/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email shape, username length and password length
 * 2. Hash password using bcrypt
 * 3. Create user in database (unique username and email)
 * 4. Generate JWT token
 * 5. Return token and user info
 *
 * # Validation
 *
 * - Email must look like `local@domain.tld`
 * - Username must be at least 3 characters
 * - Password must be at least 6 characters
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::sessions::JwtConfig;
use crate::backend::auth::users::{create_user, is_unique_violation};
use crate::backend::error::BackendError;
use crate::shared::SharedError;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check an email address shape
///
/// Accepts `local@domain.tld` where the local part uses letters, digits and
/// `._%+-`, the domain uses letters, digits, `.` and `-`, and the final label
/// is at least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validate a registration request
pub fn validate_registration(request: &RegisterRequest) -> Result<(), SharedError> {
    if !is_valid_email(&request.email) {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if request.username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(SharedError::validation(
            "username",
            "Username must be at least 3 characters",
        ));
    }
    Ok(())
}

/// Register handler
///
/// Validates the input, creates the account and returns a token so the
/// client is signed in immediately.
///
/// # Errors
///
/// * `400 Bad Request` - Invalid email, short username or short password
/// * `409 Conflict` - Username or email already registered
/// * `503 Service Unavailable` - Database not configured
/// * `500 Internal Server Error` - Hashing, insert or token generation failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "username": "ada",
///   "password": "analytical"
/// }
/// ```
pub async fn register(
    State(pool): State<Option<PgPool>>,
    State(jwt): State<JwtConfig>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    validate_registration(&request)?;
    let pool = pool.ok_or(BackendError::DatabaseUnavailable)?;

    tracing::info!("[Auth] Register request for username: {}", request.username);

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(&pool, request.username.trim(), &request.email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("[Auth] Duplicate registration: {}", request.username);
                BackendError::conflict("Email or username already exists")
            } else {
                BackendError::from(e)
            }
        })?;

    let token = jwt
        .create_token(user.id, &user.email, &user.username)
        .map_err(|e| {
            tracing::error!("[Auth] Failed to create token: {:?}", e);
            BackendError::internal("Server error")
        })?;

    tracing::info!("[Auth] User created: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}
