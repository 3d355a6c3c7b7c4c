/**
 * Chat Routes
 *
 * - `GET /ws` - WebSocket upgrade into the hub
 * - `POST /api/chat` - Broadcast a message over HTTP
 * - `GET /api/hub` - Hub statistics
 *
 * None of these require authentication.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::chat::{hub_stats, post_chat, ws_handler};
use crate::backend::server::state::AppState;

pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ws", get(ws_handler))
        .route("/api/chat", post(post_chat))
        .route("/api/hub", get(hub_stats))
}
