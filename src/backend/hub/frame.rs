/**
 * Wire Frames
 *
 * The hub's tasks never see axum types directly. Each upgraded socket is
 * split into a `Stream` of inbound [`Frame`]s and a `Sink` of outbound
 * [`Frame`]s, which keeps the ingress and egress loops testable against
 * in-memory channels.
 *
 * # Frame Kinds
 *
 * - `Payload` - opaque application bytes (text or binary on the wire)
 * - `Ping` / `Pong` - keep-alive control frames
 * - `Close` - orderly shutdown
 */

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures_util::{future, Sink, SinkExt, Stream, StreamExt};

use super::error::TransportError;

/// A single frame exchanged with a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Application payload
    Payload(Bytes),
    /// Keep-alive probe
    Ping(Bytes),
    /// Keep-alive answer
    Pong(Bytes),
    /// Close handshake
    Close,
}

impl Frame {
    /// Build a payload frame from anything byte-like
    pub fn payload(bytes: impl Into<Bytes>) -> Self {
        Self::Payload(bytes.into())
    }
}

impl From<Message> for Frame {
    fn from(message: Message) -> Self {
        match message {
            Message::Text(text) => Frame::Payload(Bytes::copy_from_slice(text.as_str().as_bytes())),
            Message::Binary(data) => Frame::Payload(data),
            Message::Ping(data) => Frame::Ping(data),
            Message::Pong(data) => Frame::Pong(data),
            Message::Close(_) => Frame::Close,
        }
    }
}

impl From<Frame> for Message {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Payload(data) => {
                // Chat clients read text frames; anything that is not UTF-8
                // goes out as binary unchanged.
                if let Ok(text) = std::str::from_utf8(&data) {
                    return Message::Text(text.into());
                }
                Message::Binary(data)
            }
            Frame::Ping(data) => Message::Ping(data),
            Frame::Pong(data) => Message::Pong(data),
            Frame::Close => Message::Close(None),
        }
    }
}

/// Split an upgraded WebSocket into frame-level halves
///
/// Returns `(sink, stream)`; the sink belongs to the egress loop and the
/// stream to the ingress loop.
pub fn websocket_halves(
    socket: WebSocket,
) -> (
    impl Sink<Frame, Error = TransportError> + Send + 'static,
    impl Stream<Item = Result<Frame, TransportError>> + Send + 'static,
) {
    let (sink, stream) = socket.split();

    let sink = sink
        .sink_map_err(TransportError::from)
        .with(|frame: Frame| future::ready(Ok::<Message, TransportError>(Message::from(frame))));

    let stream = stream.map(|result| result.map(Frame::from).map_err(TransportError::from));

    (sink, stream)
}
