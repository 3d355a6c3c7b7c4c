//! Backend Module
//!
//! All server-side code: the WebSocket connection hub and the Axum
//! application around it.
//!
//! # Architecture
//!
//! - **`hub`** - Connection registry, control loop, per-connection pumps
//! - **`server`** - Application state, database setup, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - WebSocket upgrade and HTTP broadcast handlers
//! - **`auth`** - Registration, login, JWT issuing
//! - **`profiles`** - Profile search and self-service edits
//! - **`resources`** - Shared learning resources
//! - **`middleware`** - JWT verification
//! - **`error`** - HTTP-facing error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── hub/            - Connection hub
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── chat/           - Chat entry points
//! ├── auth/           - Authentication
//! ├── profiles/       - Developer profiles
//! ├── resources/      - Shared resources
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the hub handle, the optional database pool, and the
//! JWT settings. The hub's membership is owned by a single task and is
//! reached only through `HubHandle` commands, so no handler ever locks it.

/// WebSocket connection hub
pub mod hub;

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat entry points into the hub
pub mod chat;

/// Authentication and user management
pub mod auth;

/// Developer profiles
pub mod profiles;

/// Shared resources
pub mod resources;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use hub::{HubHandle, HubStats};
pub use server::{create_app, AppState};
