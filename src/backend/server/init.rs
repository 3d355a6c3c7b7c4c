/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Load the optional database (connect + migrate)
 * 2. Build `AppState`, which starts the hub control loop
 * 3. Create the router with all routes and layers
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// A missing or unreachable database does not fail startup; only the
/// database-backed routes are disabled.
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing devnest backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;

    let app_state = AppState::new(config, db_pool);
    tracing::info!(
        "[Hub] Started (outbound capacity {}, max frame {} bytes)",
        app_state.config.hub.outbound_capacity,
        app_state.config.hub.max_frame_bytes
    );

    create_router(app_state)
}
