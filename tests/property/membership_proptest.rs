//! Property-based tests for hub membership
//!
//! Whatever the interleaving of register, unregister and broadcast, the
//! membership is exactly the registered connections minus the unregistered
//! ones, and each broadcast reaches every member once.

use std::collections::{BTreeSet, HashMap};

use bytes::Bytes;
use proptest::prelude::*;
use tokio::sync::broadcast;

use devnest::backend::hub::{Connection, ConnectionId, Outbound, Registry, TeardownReason};

const POOL: usize = 6;
const CAPACITY: usize = 64;

#[derive(Debug, Clone)]
enum Op {
    Register(usize),
    Unregister(usize),
    Broadcast,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL).prop_map(Op::Register),
        (0..POOL).prop_map(Op::Unregister),
        Just(Op::Broadcast),
    ]
}

proptest! {
    #[test]
    fn test_membership_matches_model(ops in prop::collection::vec(op(), 0..40)) {
        let (events, _) = broadcast::channel(CAPACITY);
        let mut registry = Registry::new(events);

        let mut pending: Vec<Option<Connection>> = Vec::new();
        let mut queues: HashMap<ConnectionId, Outbound> = HashMap::new();
        let mut ids = Vec::new();
        for _ in 0..POOL {
            let (connection, outbound) = Connection::open(CAPACITY);
            ids.push(connection.id());
            queues.insert(connection.id(), outbound);
            pending.push(Some(connection));
        }

        let mut model: BTreeSet<ConnectionId> = BTreeSet::new();
        let mut received: HashMap<ConnectionId, usize> = HashMap::new();

        for op in ops {
            match op {
                Op::Register(i) => {
                    // Each endpoint can be registered once; a removed one is closed
                    if let Some(connection) = pending[i].take() {
                        prop_assert!(registry.insert(connection));
                        model.insert(ids[i]);
                    }
                }
                Op::Unregister(i) => {
                    let was_member = model.remove(&ids[i]);
                    prop_assert_eq!(registry.remove(ids[i], TeardownReason::PeerClosed), was_member);
                }
                Op::Broadcast => {
                    let fan_out = registry.broadcast(&Bytes::from_static(b"tick"));
                    prop_assert_eq!(fan_out.delivered, model.len());
                    prop_assert!(fan_out.evicted.is_empty());
                    for id in &model {
                        *received.entry(*id).or_default() += 1;
                    }
                }
            }

            let actual: BTreeSet<ConnectionId> = registry.ids().collect();
            prop_assert_eq!(&actual, &model);
            prop_assert_eq!(registry.len(), model.len());
        }

        // No duplicates: each member's queue holds exactly one copy per broadcast it saw
        for (id, outbound) in queues.iter_mut() {
            let mut count = 0;
            while outbound.try_recv().is_ok() {
                count += 1;
            }
            prop_assert_eq!(count, received.get(id).copied().unwrap_or(0));
        }
    }
}
