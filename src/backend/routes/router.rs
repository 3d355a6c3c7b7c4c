/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router.
 *
 * # Route Order
 *
 * 1. Liveness (`/`, `/api/ping`)
 * 2. Chat routes (WebSocket upgrade, HTTP broadcast, hub stats)
 * 3. API routes (auth, profiles, resources)
 * 4. Fallback handler (404)
 */

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Layers
///
/// - `TraceLayer` logs every request through `tracing`
/// - `CorsLayer::permissive()` lets browser clients on other origins connect
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/", get(ping))
        .route("/api/ping", get(ping));

    let router = configure_chat_routes(router);
    let router = configure_api_routes(router, &app_state);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn ping() -> &'static str {
    "pong"
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}
