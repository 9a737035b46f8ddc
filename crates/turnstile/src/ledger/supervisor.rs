//! Ledger lifecycle management.
//!
//! The supervisor owns the map from event id to [`LedgerClient`] and spawns
//! a [`SlotLedger`] task the first time an event id is opened. Opening is
//! idempotent: racing opens for the same event resolve to the same ledger,
//! because the supervisor processes them one at a time. Lookups only clone a
//! handle, so routing traffic to a ledger is cheap and never waits on any
//! ledger's own work.

use super::{LedgerClient, SlotLedger};
use crate::error::RegistryError;
use crate::model::EventId;
use catalog_actor::client::acquire_permit;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Mailbox depth for the supervisor.
const MAILBOX: usize = 32;

/// Requests the supervisor understands.
#[derive(Debug)]
pub enum SupervisorRequest {
    /// Open the ledger for `event_id`, spawning it if this is the first
    /// open. Later opens return the existing ledger and ignore `capacity`.
    Open {
        event_id: EventId,
        capacity: u32,
        reply: oneshot::Sender<LedgerClient>,
    },
    /// Fetch the ledger for `event_id`, if one was ever opened.
    Lookup {
        event_id: EventId,
        reply: oneshot::Sender<Option<LedgerClient>>,
    },
}

/// Actor owning the event-to-ledger map.
pub struct LedgerSupervisor {
    receiver: mpsc::Receiver<SupervisorRequest>,
    ledgers: HashMap<EventId, LedgerClient>,
}

impl LedgerSupervisor {
    /// Creates the supervisor and its client.
    pub fn new() -> (Self, SupervisorClient) {
        let (sender, receiver) = mpsc::channel(MAILBOX);
        let supervisor = Self {
            receiver,
            ledgers: HashMap::new(),
        };
        (supervisor, SupervisorClient { sender })
    }

    /// Runs the supervisor loop until every client handle is dropped.
    pub async fn run(mut self) {
        info!("ledger supervisor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorRequest::Open {
                    event_id,
                    capacity,
                    reply,
                } => {
                    let client = self
                        .ledgers
                        .entry(event_id)
                        .or_insert_with(|| {
                            let (ledger, client) = SlotLedger::new(event_id, capacity);
                            tokio::spawn(ledger.run());
                            client
                        })
                        .clone();
                    debug!(%event_id, total = self.ledgers.len(), "ledger opened");
                    let _ = reply.send(client);
                }
                SupervisorRequest::Lookup { event_id, reply } => {
                    let found = self.ledgers.get(&event_id).cloned();
                    debug!(%event_id, found = found.is_some(), "ledger lookup");
                    let _ = reply.send(found);
                }
            }
        }

        info!(total = self.ledgers.len(), "ledger supervisor shut down");
    }
}

/// Handle for the ledger supervisor.
#[derive(Debug, Clone)]
pub struct SupervisorClient {
    sender: mpsc::Sender<SupervisorRequest>,
}

impl SupervisorClient {
    /// Opens (or finds) the ledger for an event.
    pub async fn open(
        &self,
        event_id: EventId,
        capacity: u32,
    ) -> Result<LedgerClient, RegistryError> {
        let (reply, response) = oneshot::channel();
        let permit = acquire_permit(&self.sender).await?;
        permit.send(SupervisorRequest::Open {
            event_id,
            capacity,
            reply,
        });
        response
            .await
            .map_err(|_| RegistryError::Storage("ledger supervisor dropped the reply channel".into()))
    }

    /// Finds the ledger for an event, if one exists.
    pub async fn lookup(&self, event_id: EventId) -> Result<Option<LedgerClient>, RegistryError> {
        let (reply, response) = oneshot::channel();
        let permit = acquire_permit(&self.sender).await?;
        permit.send(SupervisorRequest::Lookup { event_id, reply });
        response
            .await
            .map_err(|_| RegistryError::Storage("ledger supervisor dropped the reply channel".into()))
    }
}
