//! Profiles Module
//!
//! Public developer profiles: search, view, and self-service edits.
//!
//! ```text
//! profiles/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Profile queries and update validation
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod db;
pub mod handlers;

pub use db::{Profile, ProfileQuery, ProfileUpdate};
pub use handlers::{delete_me, get_profile, list_profiles, update_me};
