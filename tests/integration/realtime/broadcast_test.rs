//! Broadcast fan-out and eviction through the control loop

use std::time::Duration;

use bytes::Bytes;
use pretty_assertions::assert_eq;

use devnest::backend::hub::{Connection, HubEvent, TeardownReason};
use devnest::shared::HubConfig;

use crate::common::{connect_stalled, connect_watched_stalled, start_hub, TestClient, FRAME_WAIT};

fn recv_now(outbound: &mut devnest::backend::hub::Outbound) -> Option<Bytes> {
    outbound.try_recv().ok()
}

#[tokio::test]
async fn test_saturated_member_is_evicted_others_keep_receiving() {
    let hub = start_hub(HubConfig {
        outbound_capacity: 1,
        ..HubConfig::default()
    });
    let mut events = hub.subscribe_events();

    let (a, mut a_rx) = Connection::open(1);
    let (b, mut b_rx) = Connection::open(1);
    let (c, mut c_rx) = Connection::open(1);
    let b_id = b.id();
    let b_guard = b.guard().clone();

    hub.register(a).await.unwrap();
    hub.register(b).await.unwrap();
    hub.register(c).await.unwrap();

    hub.broadcast("hi").await.unwrap();
    // Stats round-trips through the loop, so every earlier command is done
    assert_eq!(hub.stats().await.unwrap().members, 3);

    assert_eq!(recv_now(&mut a_rx), Some(Bytes::from("hi")));
    assert_eq!(recv_now(&mut c_rx), Some(Bytes::from("hi")));
    // B never drains, so its single slot stays occupied

    hub.broadcast("again").await.unwrap();
    let stats = hub.stats().await.unwrap();
    assert_eq!(stats.members, 2);
    assert_eq!(stats.evicted, 1);

    assert_eq!(recv_now(&mut a_rx), Some(Bytes::from("again")));
    assert_eq!(recv_now(&mut c_rx), Some(Bytes::from("again")));
    assert_eq!(b_guard.reason(), Some(TeardownReason::Evicted));

    hub.broadcast("final").await.unwrap();
    hub.stats().await.unwrap();

    assert_eq!(recv_now(&mut a_rx), Some(Bytes::from("final")));
    assert_eq!(recv_now(&mut c_rx), Some(Bytes::from("final")));

    // B kept what was queued before eviction, then its queue closed
    assert_eq!(b_rx.recv().await, Some(Bytes::from("hi")));
    assert_eq!(b_rx.recv().await, None);

    let mut dropped = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let HubEvent::Dropped { id, reason } = event {
            dropped.push((id, reason));
        }
    }
    assert_eq!(dropped, vec![(b_id, TeardownReason::Evicted)]);
}

#[tokio::test]
async fn test_messages_reach_every_client_in_order() {
    let hub = start_hub(HubConfig::default());

    let mut alice = TestClient::connect(&hub).await;
    let mut bob = TestClient::connect(&hub).await;

    alice.send("one");
    alice.send("two");

    assert_eq!(alice.next_payload().await.as_deref(), Some("one"));
    assert_eq!(alice.next_payload().await.as_deref(), Some("two"));
    assert_eq!(bob.next_payload().await.as_deref(), Some("one"));
    assert_eq!(bob.next_payload().await.as_deref(), Some("two"));

    bob.send("three");

    assert_eq!(alice.next_payload().await.as_deref(), Some("three"));
    assert_eq!(bob.next_payload().await.as_deref(), Some("three"));
}

#[tokio::test]
async fn test_stalled_client_does_not_block_the_others() {
    let hub = start_hub(HubConfig {
        outbound_capacity: 2,
        ..HubConfig::default()
    });
    let mut events = hub.subscribe_events();

    let (stalled_id, _keep_open) = connect_stalled(&hub).await;
    let mut healthy = TestClient::connect(&hub).await;

    // Wait for each delivery so only the stalled queue can back up
    for n in 0..6 {
        hub.broadcast(format!("msg-{n}")).await.unwrap();
        assert_eq!(healthy.next_payload().await, Some(format!("msg-{n}")));
    }

    let stats = hub.stats().await.unwrap();
    assert_eq!(stats.members, 1);
    assert_eq!(stats.evicted, 1);

    loop {
        match events.recv().await.unwrap() {
            HubEvent::Dropped { id, reason } => {
                assert_eq!(id, stalled_id);
                assert_eq!(reason, TeardownReason::Evicted);
                break;
            }
            HubEvent::Accepted(_) => continue,
        }
    }
}

#[tokio::test]
async fn test_evicted_client_releases_socket_before_write_deadline() {
    let config = HubConfig {
        outbound_capacity: 1,
        ..HubConfig::default()
    };
    let write_timeout = config.write_timeout();
    let hub = start_hub(config);
    let mut events = hub.subscribe_events();

    let (stalled_id, mut watch) = connect_watched_stalled(&hub).await;

    hub.broadcast("first").await.unwrap();
    // Egress is now stuck inside the write of "first"
    tokio::time::timeout(FRAME_WAIT, watch.started.recv())
        .await
        .expect("write should start")
        .unwrap();
    hub.broadcast("queued").await.unwrap();
    hub.broadcast("overflow").await.unwrap();

    loop {
        match tokio::time::timeout(FRAME_WAIT, events.recv()).await.unwrap().unwrap() {
            HubEvent::Dropped { id, reason } => {
                assert_eq!(id, stalled_id);
                assert_eq!(reason, TeardownReason::Evicted);
                break;
            }
            HubEvent::Accepted(_) => continue,
        }
    }

    let released = tokio::time::timeout(Duration::from_secs(1), &mut watch.released).await;
    assert!(
        matches!(released, Ok(Err(_))),
        "sink still held after eviction (write deadline is {:?})",
        write_timeout
    );
}
