/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET /api/auth/me` - Current user (authenticated)
 *
 * ## Profiles
 * - `GET /api/profiles` - Search profiles
 * - `GET /api/profiles/{id}` - One profile
 * - `PUT /api/profiles/me` - Update own profile (authenticated)
 * - `DELETE /api/profiles/me` - Delete own account (authenticated)
 *
 * ## Resources
 * - `GET /api/resources`, `POST /api/resources`
 * - `GET|PUT|DELETE /api/resources/{id}`
 * - `POST /api/resources/{id}/like`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::profiles::{delete_me, get_profile, list_profiles, update_me};
use crate::backend::resources::{
    create_resource, delete_resource, get_resource, like_resource, list_resources,
    update_resource,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Authentication
///
/// Routes that only make sense for a signed-in user sit behind
/// `auth_middleware`. The resource routes mix public reads with
/// authenticated writes on the same path, so those handlers take the
/// `AuthUser` extractor instead.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/profiles/me", put(update_me).delete(delete_me))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Profiles
        .route("/api/profiles", get(list_profiles))
        .route("/api/profiles/{id}", get(get_profile))
        // Resources
        .route("/api/resources", get(list_resources).post(create_resource))
        .route(
            "/api/resources/{id}",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .route("/api/resources/{id}/like", post(like_resource))
        .merge(protected)
}
