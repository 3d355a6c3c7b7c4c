//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion to responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and status mapping
//! └── conversion.rs - IntoResponse and From impls
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and use `?` on database, hub, validation,
//! hashing, and token errors alike.
//!
//! # Example
//!
//! ```rust,no_run
//! use devnest::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<u32>, BackendError> {
//!     Err(BackendError::not_found("No such resource"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
