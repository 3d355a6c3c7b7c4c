//! Chat Backend Module
//!
//! HTTP and WebSocket entry points into the hub. Chat is ephemeral: a
//! message is fanned out to whoever is connected at the time and is not
//! stored.
//!
//! # Module Structure
//!
//! ```text
//! chat/
//! ├── mod.rs       - Module exports
//! ├── socket.rs    - `GET /ws` upgrade
//! └── handlers.rs  - `POST /api/chat`, `GET /api/hub`
//! ```

pub mod handlers;
pub mod socket;

pub use handlers::{hub_stats, post_chat};
pub use socket::ws_handler;
