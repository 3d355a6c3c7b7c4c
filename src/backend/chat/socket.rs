/**
 * WebSocket Upgrade Handler
 *
 * `GET /ws` upgrades the request and hands both halves of the socket to the
 * hub. Everything after the upgrade (pumping, keep-alive, teardown) is owned
 * by the connection's ingress and egress tasks.
 */

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
};

use crate::backend::hub::{websocket_halves, HubHandle};

/// Upgrade to a WebSocket and attach it to the hub
///
/// The incoming message size is capped at twice the hub's frame limit
/// (at least 1 KiB) so a huge frame fails in the codec before it is
/// buffered.
///
/// # Oversized Frames
///
/// - Between the frame limit and the codec cap: ingress sees the payload
///   and drops the connection as `ProtocolViolation`
/// - Past the codec cap: axum reports a read error, so the connection is
///   dropped as `ReadError`
///
/// # Example Request
///
/// ```http
/// GET /ws HTTP/1.1
/// Connection: Upgrade
/// Upgrade: websocket
/// Sec-WebSocket-Version: 13
/// Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==
/// ```
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<HubHandle>) -> Response {
    // Leave headroom so the ingress loop sees the frame and reports a
    // protocol violation instead of the codec dropping it silently.
    let limit = hub.config().max_frame_bytes.saturating_mul(2).max(1024);

    ws.max_message_size(limit)
        .on_upgrade(move |socket| async move {
            let (sink, stream) = websocket_halves(socket);
            match hub.attach(sink, stream).await {
                Ok(id) => tracing::info!("[Hub] WebSocket connection {} attached", id),
                Err(e) => tracing::warn!("[Hub] Rejected WebSocket connection: {}", e),
            }
        })
}
