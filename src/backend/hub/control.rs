/**
 * Hub Control Loop
 *
 * One task owns the [`Registry`] and applies [`HubCommand`]s strictly in
 * arrival order. Everything else talks to it through a cloneable
 * [`HubHandle`]; no other task ever touches the membership set.
 *
 * The loop never waits on a connection. Fan-out uses non-blocking enqueue
 * and evicts whoever is full, so one slow reader cannot stall delivery to
 * the rest. When every handle is gone the loop tears down the remaining
 * members and returns.
 */

use bytes::Bytes;
use futures_util::{Sink, Stream};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::shared::config::HubConfig;

use super::connection::{Connection, ConnectionId, TeardownReason};
use super::error::{HubError, TransportError};
use super::frame::Frame;
use super::registry::{HubEvent, HubStats, Registry};
use super::{egress, ingress};

/// Requests processed by the control loop
#[derive(Debug)]
pub enum HubCommand {
    /// Admit a connection
    Register(Connection),
    /// Remove a connection; no-op if it is already gone
    Unregister {
        id: ConnectionId,
        reason: TeardownReason,
    },
    /// Deliver a payload to every current member
    Broadcast(Bytes),
    /// Report counters
    Stats(oneshot::Sender<HubStats>),
}

/// The control loop. Build with [`Hub::new`], then drive with [`Hub::run`].
pub struct Hub {
    registry: Registry,
    commands: mpsc::Receiver<HubCommand>,
}

impl Hub {
    pub fn new(config: HubConfig) -> (Self, HubHandle) {
        let (command_tx, commands) = mpsc::channel(config.command_capacity.max(1));
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        let hub = Self {
            registry: Registry::new(events.clone()),
            commands,
        };
        let handle = HubHandle {
            commands: command_tx,
            events,
            config: Arc::new(config),
        };
        (hub, handle)
    }

    /// Process commands until every [`HubHandle`] has been dropped
    pub async fn run(mut self) {
        tracing::info!("[Hub] Control loop started");

        while let Some(command) = self.commands.recv().await {
            self.apply(command);
        }

        tracing::info!(
            "[Hub] All handles dropped, closing {} connection(s)",
            self.registry.len()
        );
        self.registry.clear(TeardownReason::HubShutdown);
    }

    fn apply(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(connection) => {
                self.registry.insert(connection);
            }
            HubCommand::Unregister { id, reason } => {
                if !self.registry.remove(id, reason) {
                    tracing::debug!("[Hub] Unregister for {} ignored, not a member", id);
                }
            }
            HubCommand::Broadcast(payload) => {
                let fan_out = self.registry.broadcast(&payload);
                tracing::debug!(
                    "[Hub] Broadcast {} bytes to {} member(s), evicted {}",
                    payload.len(),
                    fan_out.delivered,
                    fan_out.evicted.len()
                );
            }
            HubCommand::Stats(reply) => {
                let _ = reply.send(self.registry.stats());
            }
        }
    }
}

/// Spawn a hub on the current runtime and return its handle
pub fn spawn(config: HubConfig) -> (HubHandle, JoinHandle<()>) {
    let (hub, handle) = Hub::new(config);
    let task = tokio::spawn(hub.run());
    (handle, task)
}

/// Cloneable front door to a running hub
#[derive(Clone)]
pub struct HubHandle {
    commands: mpsc::Sender<HubCommand>,
    events: broadcast::Sender<HubEvent>,
    config: Arc<HubConfig>,
}

impl HubHandle {
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub async fn register(&self, connection: Connection) -> Result<(), HubError> {
        self.commands.send(HubCommand::Register(connection)).await?;
        Ok(())
    }

    pub async fn unregister(&self, id: ConnectionId, reason: TeardownReason) -> Result<(), HubError> {
        self.commands
            .send(HubCommand::Unregister { id, reason })
            .await?;
        Ok(())
    }

    /// Queue a payload for delivery to every member, the sender included
    pub async fn broadcast(&self, payload: impl Into<Bytes>) -> Result<(), HubError> {
        self.commands
            .send(HubCommand::Broadcast(payload.into()))
            .await?;
        Ok(())
    }

    pub async fn stats(&self) -> Result<HubStats, HubError> {
        let (reply, rx) = oneshot::channel();
        self.commands.send(HubCommand::Stats(reply)).await?;
        Ok(rx.await?)
    }

    /// Receive `Accepted` / `Dropped` notifications from now on
    pub fn subscribe_events(&self) -> broadcast::Receiver<HubEvent> {
        self.events.subscribe()
    }

    /// Register a new connection over `sink`/`stream` and start its tasks
    ///
    /// The connection is queued for registration before either task starts,
    /// so its own first broadcast always finds it in the membership.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Unavailable` if the control loop has stopped; the
    /// transport halves are dropped in that case.
    pub async fn attach<K, S>(&self, sink: K, stream: S) -> Result<ConnectionId, HubError>
    where
        K: Sink<Frame, Error = TransportError> + Send + 'static,
        S: Stream<Item = Result<Frame, TransportError>> + Send + 'static,
    {
        let (connection, outbound) = Connection::open(self.config.outbound_capacity);
        let id = connection.id();
        let guard = connection.guard().clone();

        self.register(connection).await?;

        tokio::spawn(egress::run(id, self.clone(), guard.clone(), outbound, sink));
        tokio::spawn(ingress::run(id, self.clone(), guard, stream));

        tracing::debug!("[Hub] Attached connection {}", id);
        Ok(id)
    }
}
