//! Shared Module
//!
//! Types that are used on both sides of the HTTP boundary: configuration,
//! validation errors, and the chat message envelope. Nothing in here knows
//! about axum, sqlx, or the hub's tasks.

/// Chat message envelope
pub mod message;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{ChatPost, Message, ANONYMOUS_AUTHOR};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, HubConfig};
