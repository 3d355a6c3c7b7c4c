//! Connection Hub Module
//!
//! Real-time fan-out for chat. Every connected client is a member; every
//! payload a member sends is delivered to all members, the sender included.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────┐   HubCommand    ┌────────────────────┐
//!  socket ──▶│ ingress task │────────────────▶│                    │
//!            └──────────────┘                 │  control loop      │
//!                                             │  (owns Registry)   │
//!            ┌──────────────┐  outbound queue │                    │
//!  socket ◀──│ egress task  │◀────────────────│                    │
//!            └──────────────┘   (bounded)     └────────────────────┘
//! ```
//!
//! - One control loop serializes `Register`, `Unregister` and `Broadcast`.
//! - Each connection gets two tasks: ingress (read → broadcast) and egress
//!   (queue → write, plus keep-alive pings).
//! - Broadcast never blocks: a member whose queue is full is evicted.
//! - Teardown is idempotent; the first cause recorded on a connection's
//!   [`CloseGuard`] wins.
//!
//! # Module Structure
//!
//! ```text
//! hub/
//! ├── mod.rs         - Module exports and documentation
//! ├── connection.rs  - Connection endpoint, close guard, teardown reasons
//! ├── control.rs     - Control loop, commands, HubHandle
//! ├── registry.rs    - Membership set and fan-out
//! ├── ingress.rs     - Per-connection read loop
//! ├── egress.rs      - Per-connection write loop
//! ├── frame.rs       - Transport-neutral frames, axum adapter
//! └── error.rs       - Hub and transport errors
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use devnest::backend::hub;
//! use devnest::shared::HubConfig;
//!
//! # async fn demo() -> Result<(), hub::HubError> {
//! let (handle, _task) = hub::spawn(HubConfig::default());
//! handle.broadcast("hello").await?;
//! println!("{} members", handle.stats().await?.members);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod control;
pub mod egress;
pub mod error;
pub mod frame;
pub mod ingress;
pub mod registry;

pub use connection::{CloseGuard, Connection, ConnectionId, Outbound, TeardownReason};
pub use control::{spawn, Hub, HubCommand, HubHandle};
pub use error::{EnqueueError, HubError, TransportError};
pub use frame::{websocket_halves, Frame};
pub use registry::{FanOut, HubEvent, HubStats, Registry};
