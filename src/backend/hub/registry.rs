/**
 * Membership Registry
 *
 * The set of live connections. Only the hub's control loop holds a
 * `Registry`, so none of these methods lock anything; every mutation is
 * serialized by the loop's command queue.
 *
 * Teardown always goes through [`Registry::remove`], which removes the
 * entry, fires the connection's guard, and publishes a `Dropped` event.
 * Whichever path gets there first wins; the others find nothing to remove.
 */

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::connection::{Connection, ConnectionId, TeardownReason};

/// Lifecycle notification published by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubEvent {
    /// A connection joined the membership
    Accepted(ConnectionId),
    /// A connection left the membership
    Dropped {
        id: ConnectionId,
        reason: TeardownReason,
    },
}

/// Point-in-time counters for the hub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HubStats {
    /// Live members
    pub members: usize,
    /// Payloads enqueued since start
    pub delivered: u64,
    /// Connections evicted for a saturated queue since start
    pub evicted: u64,
}

/// Outcome of one fan-out
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FanOut {
    /// Members the payload was queued for
    pub delivered: usize,
    /// Members removed because their queue was full or closed
    pub evicted: Vec<ConnectionId>,
}

pub struct Registry {
    members: HashMap<ConnectionId, Connection>,
    events: broadcast::Sender<HubEvent>,
    delivered: u64,
    evicted: u64,
}

impl Registry {
    pub fn new(events: broadcast::Sender<HubEvent>) -> Self {
        Self {
            members: HashMap::new(),
            events,
            delivered: 0,
            evicted: 0,
        }
    }

    /// Add a connection. A connection that is already a member is left alone.
    pub fn insert(&mut self, connection: Connection) -> bool {
        let id = connection.id();
        if self.members.contains_key(&id) {
            tracing::debug!("[Hub] Ignoring duplicate registration for {}", id);
            return false;
        }
        if connection.is_closed() {
            // Torn down before the hub saw it, e.g. ingress failed while the
            // register command was still queued.
            tracing::debug!("[Hub] Ignoring registration of closed connection {}", id);
            return false;
        }

        self.members.insert(id, connection);
        let _ = self.events.send(HubEvent::Accepted(id));
        tracing::info!("[Hub] Connection {} registered ({} members)", id, self.members.len());
        true
    }

    /// Remove and tear down a member. Returns `false` if it was not a member.
    pub fn remove(&mut self, id: ConnectionId, reason: TeardownReason) -> bool {
        match self.members.remove(&id) {
            Some(connection) => {
                self.teardown(connection, reason);
                true
            }
            None => false,
        }
    }

    /// Queue `payload` for every member without waiting on any of them
    ///
    /// Members whose queue is full (or whose egress is gone) are evicted in
    /// the same pass. A member evicted here receives nothing further.
    pub fn broadcast(&mut self, payload: &Bytes) -> FanOut {
        let mut fan_out = FanOut::default();

        for (id, connection) in &self.members {
            match connection.enqueue(payload.clone()) {
                Ok(()) => fan_out.delivered += 1,
                Err(err) => {
                    tracing::warn!("[Hub] Evicting {}: {}", id, err);
                    fan_out.evicted.push(*id);
                }
            }
        }

        for id in &fan_out.evicted {
            if self.remove(*id, TeardownReason::Evicted) {
                self.evicted += 1;
            }
        }

        self.delivered += fan_out.delivered as u64;
        fan_out
    }

    /// Tear down every member
    pub fn clear(&mut self, reason: TeardownReason) {
        let ids: Vec<ConnectionId> = self.members.keys().copied().collect();
        for id in ids {
            self.remove(id, reason);
        }
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.members.keys().copied()
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            members: self.members.len(),
            delivered: self.delivered,
            evicted: self.evicted,
        }
    }

    fn teardown(&self, connection: Connection, reason: TeardownReason) {
        connection.close(reason);
        let reason = connection.guard().reason().unwrap_or(reason);
        let id = connection.id();
        drop(connection);

        let _ = self.events.send(HubEvent::Dropped { id, reason });
        tracing::info!(
            "[Hub] Connection {} dropped: {} ({} members)",
            id,
            reason,
            self.members.len()
        );
    }
}
