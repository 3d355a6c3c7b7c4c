/**
 * Chat HTTP Handlers
 *
 * # Routes
 *
 * - `POST /api/chat` - Broadcast a message to every connected socket
 * - `GET /api/hub` - Hub membership and delivery counters
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::error::BackendError;
use crate::backend::hub::{HubHandle, HubStats};
use crate::shared::{ChatPost, Message};

/// Broadcast a chat message over HTTP
///
/// The message is stamped, encoded, and checked against the same frame
/// limit a WebSocket client is held to. Delivery is fire-and-forget; the
/// response only confirms that the hub accepted the broadcast.
///
/// # Errors
///
/// * `400 Bad Request` - Empty text or encoded message over the frame limit
/// * `503 Service Unavailable` - The hub has stopped
///
/// # Example Request
///
/// ```http
/// POST /api/chat HTTP/1.1
/// Content-Type: application/json
///
/// { "text": "standup in 5", "author": "ana" }
/// ```
pub async fn post_chat(
    State(hub): State<HubHandle>,
    Json(post): Json<ChatPost>,
) -> Result<(StatusCode, Json<Message>), BackendError> {
    let message = post.into_message();
    message.validate(hub.config().max_frame_bytes)?;

    let payload = message.to_payload()?;
    hub.broadcast(payload).await?;

    tracing::debug!("[Chat] {} posted {} chars", message.author, message.text.len());
    Ok((StatusCode::ACCEPTED, Json(message)))
}

pub async fn hub_stats(State(hub): State<HubHandle>) -> Result<Json<HubStats>, BackendError> {
    Ok(Json(hub.stats().await?))
}
