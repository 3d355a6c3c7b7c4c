//! Route Configuration Module
//!
//! Routes are grouped by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── chat_routes.rs  - WebSocket and chat routes
//! └── api_routes.rs   - Auth, profile and resource routes
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use devnest::backend::routes::create_router;
//! use devnest::backend::server::AppState;
//! use devnest::shared::AppConfig;
//!
//! # async fn example() {
//! let state = AppState::new(AppConfig::default(), None);
//! let router = create_router(state);
//! # }
//! ```

/// Main router creation
pub mod router;

/// WebSocket and chat routes
pub mod chat_routes;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
