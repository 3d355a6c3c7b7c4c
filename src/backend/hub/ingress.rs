//! Ingress loop
//!
//! Reads frames from one connection and forwards payloads to the hub as
//! broadcasts. Stops on the first read error, idle timeout, oversized frame,
//! or close from the peer, then asks the hub to unregister the connection.
//! Also stops, without reporting anything, once the connection's guard fires.

use futures_util::{Stream, StreamExt};

use super::connection::{CloseGuard, ConnectionId, TeardownReason};
use super::control::HubHandle;
use super::error::TransportError;
use super::frame::Frame;

/// Run the ingress loop to completion
///
/// Returns the reason this loop gave up, or `None` if teardown was started
/// somewhere else.
pub async fn run<S>(
    id: ConnectionId,
    hub: HubHandle,
    guard: CloseGuard,
    stream: S,
) -> Option<TeardownReason>
where
    S: Stream<Item = Result<Frame, TransportError>>,
{
    tokio::pin!(stream);

    let max_frame_bytes = hub.config().max_frame_bytes;
    let read_timeout = hub.config().read_timeout();

    let reason = loop {
        let next = tokio::select! {
            biased;
            _ = guard.closed() => {
                tracing::debug!("[Ingress] {} stopping, connection closed", id);
                return None;
            }
            next = tokio::time::timeout(read_timeout, stream.next()) => next,
        };

        match next {
            Err(_) => {
                tracing::info!("[Ingress] {} idle for {:?}, closing", id, read_timeout);
                break TeardownReason::ReadError;
            }
            Ok(None) | Ok(Some(Ok(Frame::Close))) => {
                break TeardownReason::PeerClosed;
            }
            Ok(Some(Err(e))) => {
                tracing::warn!("[Ingress] {} read failed: {}", id, e);
                break TeardownReason::ReadError;
            }
            // Any inbound traffic resets the idle timer.
            Ok(Some(Ok(Frame::Ping(_) | Frame::Pong(_)))) => continue,
            Ok(Some(Ok(Frame::Payload(payload)))) => {
                if payload.len() > max_frame_bytes {
                    tracing::warn!(
                        "[Ingress] {} sent {} bytes, limit is {}",
                        id,
                        payload.len(),
                        max_frame_bytes
                    );
                    break TeardownReason::ProtocolViolation;
                }
                if hub.broadcast(payload).await.is_err() {
                    break TeardownReason::HubShutdown;
                }
            }
        }
    };

    if hub.unregister(id, reason).await.is_err() {
        // Nobody left to do it for us.
        guard.close(reason);
    }
    Some(reason)
}
