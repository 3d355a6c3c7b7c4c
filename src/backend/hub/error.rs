//! Hub error types
//!
//! None of these ever reach the hub's control loop as a failure: transport
//! and enqueue errors are turned into a teardown of the one connection they
//! belong to, and `HubError` is only seen by callers outside the loop.

use thiserror::Error;

/// Errors returned by [`HubHandle`](super::HubHandle) operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HubError {
    /// The control loop has exited and no longer accepts commands
    #[error("hub control loop is not running")]
    Unavailable,
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for HubError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::Unavailable
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for HubError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::Unavailable
    }
}

/// Failure reading from or writing to one connection's stream
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error reported by the WebSocket implementation
    #[error("websocket error: {0}")]
    WebSocket(#[from] axum::Error),
    /// The stream is gone
    #[error("connection closed")]
    Closed,
    /// A write did not finish before its deadline
    #[error("write deadline exceeded")]
    Timeout,
}

/// Why a payload could not be queued for a connection
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueError {
    /// The outbound queue is at capacity; the consumer is not keeping up
    #[error("outbound queue full")]
    Full,
    /// The egress loop has dropped its end of the queue
    #[error("outbound queue closed")]
    Closed,
}
