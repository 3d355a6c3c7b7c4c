//! Server Module
//!
//! Startup plumbing for the Axum server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database connection and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Database**: Connects and migrates if `DATABASE_URL` is set
//! 2. **State**: Starts the hub and derives the JWT settings
//! 3. **Router**: Configures all routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use devnest::backend::server::create_app;
//! use devnest::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database setup
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
