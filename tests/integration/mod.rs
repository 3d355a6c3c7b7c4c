//! Integration tests
//!
//! - `api` - HTTP routes through `axum-test`
//! - `database` - Schema and migrations (needs PostgreSQL)
//! - `realtime` - Hub behaviour through in-memory clients

mod api;
