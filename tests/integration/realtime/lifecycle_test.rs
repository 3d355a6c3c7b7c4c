//! Connection lifecycle: accept, peer close, protocol violation

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::broadcast;

use devnest::backend::hub::{ConnectionId, Frame, HubEvent, TeardownReason};
use devnest::shared::HubConfig;

use crate::common::{start_hub, TestClient};

async fn next_drop(events: &mut broadcast::Receiver<HubEvent>) -> (ConnectionId, TeardownReason) {
    loop {
        let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
            .await
            .expect("drop event in time")
            .expect("event channel open");
        if let HubEvent::Dropped { id, reason } = event {
            return (id, reason);
        }
    }
}

#[tokio::test]
async fn test_attach_emits_accepted() {
    let hub = start_hub(HubConfig::default());
    let mut events = hub.subscribe_events();

    let client = TestClient::connect(&hub).await;

    let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, HubEvent::Accepted(client.id));
    assert_eq!(hub.stats().await.unwrap().members, 1);
}

#[tokio::test]
async fn test_peer_close_unregisters_once() {
    let hub = start_hub(HubConfig::default());
    let mut events = hub.subscribe_events();

    let mut leaving = TestClient::connect(&hub).await;
    let mut staying = TestClient::connect(&hub).await;

    leaving.send_frame(Frame::Close);

    assert_eq!(next_drop(&mut events).await, (leaving.id, TeardownReason::PeerClosed));
    assert!(leaving.wait_closed().await);

    hub.broadcast("after").await.unwrap();
    assert_eq!(staying.next_payload().await.as_deref(), Some("after"));

    let stats = hub.stats().await.unwrap();
    assert_eq!(stats.members, 1);
    assert_eq!(stats.evicted, 0);

    // A second unregister for the same connection is a no-op
    hub.unregister(leaving.id, TeardownReason::ReadError).await.unwrap();
    hub.stats().await.unwrap();
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_oversized_frame_closes_connection() {
    let hub = start_hub(HubConfig {
        max_frame_bytes: 8,
        ..HubConfig::default()
    });
    let mut events = hub.subscribe_events();

    let mut offender = TestClient::connect(&hub).await;
    let mut bystander = TestClient::connect(&hub).await;

    offender.send("this is far too long");

    assert_eq!(
        next_drop(&mut events).await,
        (offender.id, TeardownReason::ProtocolViolation)
    );
    assert!(offender.wait_closed().await);

    // The oversized payload was never broadcast
    bystander.send("ok");
    assert_eq!(bystander.next_payload().await.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_ping_frames_are_not_broadcast() {
    let hub = start_hub(HubConfig::default());

    let mut alice = TestClient::connect(&hub).await;
    let bob = TestClient::connect(&hub).await;

    bob.send_frame(Frame::Pong(bytes::Bytes::new()));
    bob.send_frame(Frame::Ping(bytes::Bytes::new()));
    bob.send("real");

    assert_eq!(alice.next_payload().await.as_deref(), Some("real"));
}
