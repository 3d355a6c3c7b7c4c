/**
 * Application State Management
 *
 * `AppState` is the central state container handed to the router. Handlers
 * never take the whole struct; the `FromRef` implementations below let each
 * one extract only what it uses (`State<HubHandle>`, `State<Option<PgPool>>`,
 * `State<JwtConfig>`).
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use devnest::backend::hub::HubHandle;
 *
 * async fn handler(State(hub): State<HubHandle>) {
 *     let _ = hub.broadcast("hello").await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::JwtConfig;
use crate::backend::hub::{self, HubHandle};
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,

    /// Handle to the running hub
    ///
    /// The hub task lives as long as at least one handle does; every clone
    /// of `AppState` keeps it alive.
    pub hub: HubHandle,

    /// Database connection pool
    ///
    /// `None` when `DATABASE_URL` is unset or the connection failed. Handlers
    /// that need it answer `503 Service Unavailable`.
    pub db_pool: Option<PgPool>,

    /// Token signing settings
    pub jwt: JwtConfig,
}

impl AppState {
    /// Build the state and start the hub
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        let jwt = JwtConfig::from_app_config(&config);
        let (hub, _task) = hub::spawn(config.hub.clone());

        Self {
            config: Arc::new(config),
            hub,
            db_pool,
            jwt,
        }
    }
}

impl FromRef<AppState> for HubHandle {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for JwtConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.jwt.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
