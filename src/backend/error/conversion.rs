/**
 * Error Conversion
 *
 * `IntoResponse` for [`BackendError`], plus conversions from the auth
 * crates so handlers can use `?` on hashing and token calls.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Http] {} ({})", self, status);
        } else {
            tracing::debug!("[Http] {} ({})", self, status);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("[Auth] Password hashing failed: {:?}", err);
        BackendError::internal("Server error")
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::warn!("[Auth] Token error: {:?}", err);
        BackendError::unauthorized("Invalid or expired token")
    }
}
