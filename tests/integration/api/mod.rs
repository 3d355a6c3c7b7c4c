//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod chat_test;
mod resources_test;
