/**
 * Backend Error Types
 *
 * Errors raised by HTTP handlers. Every variant maps to one status code
 * and renders as a JSON body (see `conversion.rs`).
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Problems with the request itself: bad input, missing or invalid token,
 * acting on someone else's resource, unknown ids, duplicates.
 *
 * ## Service Errors
 *
 * A dependency is not there: the database is not configured, or the hub's
 * control loop has stopped. Both are 503.
 *
 * ## Database Errors
 *
 * `sqlx` failures. `RowNotFound` becomes 404; anything else is a 500 and
 * the driver message is logged, never returned.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::hub::HubError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use devnest::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("Resource not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-level error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// `DATABASE_URL` was not configured
    #[error("Database not configured")]
    DatabaseUnavailable,

    /// Query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The hub is not accepting commands
    #[error(transparent)]
    Hub(#[from] HubError),

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// Create an internal error; `message` is what the client sees
    pub fn internal(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `DatabaseUnavailable` / `Hub` - 503 Service Unavailable
    /// - `Database` - 404 for `RowNotFound`, otherwise 500
    /// - `SharedError` - 400 for validation and message errors, 500 otherwise
    /// - `SerializationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Hub(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::MessageError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message returned to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseUnavailable => "Database not configured".to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "Not found".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Hub(err) => err.to_string(),
            Self::SharedError(err) => err.to_string(),
            Self::SerializationError(_) => "Serialization error".to_string(),
        }
    }
}
