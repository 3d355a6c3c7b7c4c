//! devnest - Main Library
//!
//! A community backend for developers: accounts, searchable profiles and
//! shared resources over REST, plus a real-time chat fan-out over
//! WebSockets.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Configuration (`AppConfig`, `HubConfig`)
//!   - The chat message envelope
//!   - Validation errors
//!
//! - **`backend`** - The Axum server
//!   - The connection hub (register, unregister, broadcast)
//!   - Auth, profiles and resources backed by PostgreSQL
//!   - Routing, middleware, HTTP error mapping
//!
//! # Usage
//!
//! ```rust,no_run
//! use devnest::backend::server::create_app;
//! use devnest::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let addr = config.bind_addr();
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and encoding
//! - `backend::hub::HubError` when the hub has stopped
//! - `backend::BackendError` for everything that becomes an HTTP response

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
