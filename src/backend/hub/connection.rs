/**
 * Connection Endpoint
 *
 * A [`Connection`] is the hub's view of one client: an id, the sending half
 * of its bounded outbound queue, and a [`CloseGuard`] shared with the
 * connection's ingress and egress tasks.
 *
 * The registry owns the `Connection`. Dropping it drops the only sender of
 * the outbound queue, which the egress task observes as "queue closed".
 * The guard is what makes teardown happen exactly once no matter how many
 * paths (read error, write error, eviction, shutdown) race to trigger it.
 */

use bytes::Bytes;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use super::error::EnqueueError;

/// Opaque identifier for a live connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a connection was torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeardownReason {
    /// Read failed or the connection sat idle past the read timeout
    ReadError,
    /// The peer sent a close frame or ended the stream
    PeerClosed,
    /// The peer sent a frame larger than the inbound limit
    ProtocolViolation,
    /// A write failed or missed its deadline
    WriteError,
    /// The outbound queue was closed underneath the egress task
    QueueClosed,
    /// The outbound queue was saturated during a broadcast
    Evicted,
    /// The hub stopped
    HubShutdown,
}

impl TeardownReason {
    /// Short label used in logs and events
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadError => "read_error",
            Self::PeerClosed => "peer_closed",
            Self::ProtocolViolation => "protocol_violation",
            Self::WriteError => "write_error",
            Self::QueueClosed => "queue_closed",
            Self::Evicted => "evicted",
            Self::HubShutdown => "hub_shutdown",
        }
    }
}

impl fmt::Display for TeardownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-shot close signal shared by a connection's tasks
///
/// The first [`close`](CloseGuard::close) records its reason and wakes every
/// waiter; later calls return `false` and change nothing.
#[derive(Clone)]
pub struct CloseGuard {
    inner: Arc<GuardInner>,
}

struct GuardInner {
    reason: OnceLock<TeardownReason>,
    signal: watch::Sender<bool>,
}

impl CloseGuard {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            inner: Arc::new(GuardInner {
                reason: OnceLock::new(),
                signal,
            }),
        }
    }

    /// Fire the guard. Returns `true` only for the call that fired it.
    pub fn close(&self, reason: TeardownReason) -> bool {
        if self.inner.reason.set(reason).is_err() {
            return false;
        }
        self.inner.signal.send_replace(true);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.inner.reason.get().is_some()
    }

    /// Reason recorded by the first `close`
    pub fn reason(&self) -> Option<TeardownReason> {
        self.inner.reason.get().copied()
    }

    /// Resolves once the guard has fired
    pub async fn closed(&self) {
        let mut rx = self.inner.signal.subscribe();
        // Sender lives in `self`, so this only returns once the value is true.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for CloseGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CloseGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseGuard")
            .field("reason", &self.reason())
            .finish()
    }
}

/// The receiving half of a connection's outbound queue, owned by egress
pub type Outbound = mpsc::Receiver<Bytes>;

/// The hub's handle on one registered client
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    outbound: mpsc::Sender<Bytes>,
    guard: CloseGuard,
}

impl Connection {
    /// Create an endpoint with an empty outbound queue of `capacity` slots
    ///
    /// The returned [`Outbound`] belongs to the connection's egress task.
    pub fn open(capacity: usize) -> (Self, Outbound) {
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        let connection = Self {
            id: ConnectionId::new(),
            outbound,
            guard: CloseGuard::new(),
        };
        (connection, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn guard(&self) -> &CloseGuard {
        &self.guard
    }

    /// Queue a payload without waiting
    ///
    /// # Errors
    ///
    /// - `EnqueueError::Full` if the queue is at capacity
    /// - `EnqueueError::Closed` if egress has gone away
    pub fn enqueue(&self, payload: Bytes) -> Result<(), EnqueueError> {
        self.outbound.try_send(payload).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
            mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
        })
    }

    /// Fire this connection's close guard
    pub fn close(&self, reason: TeardownReason) -> bool {
        self.guard.close(reason)
    }

    pub fn is_closed(&self) -> bool {
        self.guard.is_closed()
    }
}
