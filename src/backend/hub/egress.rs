//! Egress loop
//!
//! Drains one connection's outbound queue into its sink, each write bounded
//! by the write deadline, and sends a keep-alive ping whenever the
//! connection has been quiet for a full ping period.
//!
//! The loop ends when the outbound queue closes, when the connection's
//! guard fires, or when a write fails. In the first two cases it makes a
//! best-effort close handshake; after a failed write it asks the hub to
//! unregister the connection instead. A write in flight when the guard fires
//! is abandoned and the sink released straight away.

use bytes::Bytes;
use futures_util::{Sink, SinkExt};
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

use super::connection::{CloseGuard, ConnectionId, Outbound, TeardownReason};
use super::control::HubHandle;
use super::error::TransportError;
use super::frame::Frame;

/// Run the egress loop to completion and return why it stopped
pub async fn run<K>(
    id: ConnectionId,
    hub: HubHandle,
    guard: CloseGuard,
    mut outbound: Outbound,
    sink: K,
) -> TeardownReason
where
    K: Sink<Frame, Error = TransportError>,
{
    tokio::pin!(sink);

    let write_timeout = hub.config().write_timeout();
    let ping_period = hub.config().ping_period();

    let mut keepalive = tokio::time::interval_at(Instant::now() + ping_period, ping_period);
    keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Set when teardown cut a write short; the sink may be wedged mid-frame.
    let mut interrupted = false;

    let reason = loop {
        tokio::select! {
            biased;
            _ = guard.closed() => {
                // Anything still queued is dropped with the connection.
                break guard.reason().unwrap_or(TeardownReason::QueueClosed);
            }
            next = outbound.recv() => match next {
                Some(payload) => match write_unless_closed(&mut sink, &guard, Frame::Payload(payload), write_timeout).await {
                    Some(Ok(())) => keepalive.reset(),
                    Some(Err(e)) => {
                        tracing::warn!("[Egress] {} write failed: {}", id, e);
                        break TeardownReason::WriteError;
                    }
                    None => {
                        interrupted = true;
                        break guard.reason().unwrap_or(TeardownReason::QueueClosed);
                    }
                },
                None => break TeardownReason::QueueClosed,
            },
            _ = keepalive.tick() => match write_unless_closed(&mut sink, &guard, Frame::Ping(Bytes::new()), write_timeout).await {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    tracing::warn!("[Egress] {} keep-alive failed: {}", id, e);
                    break TeardownReason::WriteError;
                }
                None => {
                    interrupted = true;
                    break guard.reason().unwrap_or(TeardownReason::QueueClosed);
                }
            },
        }
    };

    if reason == TeardownReason::WriteError {
        if hub.unregister(id, reason).await.is_err() {
            guard.close(reason);
        }
    } else if interrupted {
        // A half-written frame cannot be followed by a close frame.
        tracing::debug!("[Egress] {} torn down mid-write, releasing sink", id);
    } else {
        if let Err(e) = write(&mut sink, Frame::Close, write_timeout).await {
            tracing::debug!("[Egress] {} close frame not sent: {}", id, e);
        }
        let _ = tokio::time::timeout(write_timeout, sink.as_mut().close()).await;
    }

    tracing::debug!("[Egress] {} stopped: {}", id, reason);
    reason
}

/// Like [`write`], but gives up as soon as the guard fires. `None` means it did.
async fn write_unless_closed<K>(
    sink: &mut Pin<&mut K>,
    guard: &CloseGuard,
    frame: Frame,
    deadline: Duration,
) -> Option<Result<(), TransportError>>
where
    K: Sink<Frame, Error = TransportError>,
{
    tokio::select! {
        biased;
        _ = guard.closed() => None,
        result = write(sink, frame, deadline) => Some(result),
    }
}

async fn write<K>(sink: &mut Pin<&mut K>, frame: Frame, deadline: Duration) -> Result<(), TransportError>
where
    K: Sink<Frame, Error = TransportError>,
{
    match tokio::time::timeout(deadline, sink.as_mut().send(frame)).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout),
    }
}
