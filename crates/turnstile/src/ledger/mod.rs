//! Per-event slot ledgers.
//!
//! A [`SlotLedger`] is the authority for one event's registrations: a
//! dedicated task owning the registration map and the capacity limit. Every
//! admission decision happens inside a single handler invocation of that
//! task, which makes the capacity check, the duplicate check, and the insert
//! one atomic unit. No interleaving of concurrent callers can observe or
//! create a state between the check and the insert.
//!
//! One ledger per event also sets the serialization boundary exactly where
//! it belongs: admissions for the same event queue up in mailbox order,
//! while admissions for different events run on different tasks and never
//! wait on each other.
//!
//! Occupancy is published through a `watch` channel on every mutation.
//! Readers observe the latest snapshot from the channel without entering the
//! mailbox, so reporting never queues behind admissions.

pub mod supervisor;

pub use supervisor::{LedgerSupervisor, SupervisorClient};

use crate::error::RegistryError;
use crate::model::{EventId, Registration, UserId};
use catalog_actor::client::acquire_permit;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

/// Mailbox depth for one slot ledger.
const MAILBOX: usize = 64;

/// Outcome of an atomic insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The slot is claimed; a registration record now exists.
    Accepted,
    /// Every slot was already taken.
    CapacityExceeded,
    /// The user already holds a slot on this event.
    Duplicate,
}

/// Outcome of an atomic remove attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The registration existed and is gone; its slot is free again.
    Deleted,
    /// No registration matched the pair.
    NotFound,
}

/// Requests a slot ledger understands.
#[derive(Debug)]
pub enum LedgerRequest {
    /// Claim a slot for `user_id` if capacity allows and the user holds
    /// none yet; decided and applied atomically.
    TryInsert {
        user_id: UserId,
        created_at: DateTime<Utc>,
        reply: oneshot::Sender<InsertOutcome>,
    },
    /// Release the slot held by `user_id`, if any; decided and applied
    /// atomically.
    Remove {
        user_id: UserId,
        reply: oneshot::Sender<DeleteOutcome>,
    },
    /// A point-in-time copy of every registration on this event.
    Snapshot {
        reply: oneshot::Sender<Vec<Registration>>,
    },
}

/// Actor owning the registrations of a single event.
pub struct SlotLedger {
    event_id: EventId,
    capacity: u32,
    receiver: mpsc::Receiver<LedgerRequest>,
    registered: std::collections::HashMap<UserId, Registration>,
    occupancy_tx: watch::Sender<u32>,
}

impl SlotLedger {
    /// Creates the ledger and its client. `capacity` is fixed for the
    /// ledger's lifetime, as event metadata is immutable.
    pub fn new(event_id: EventId, capacity: u32) -> (Self, LedgerClient) {
        let (sender, receiver) = mpsc::channel(MAILBOX);
        let (occupancy_tx, occupancy_rx) = watch::channel(0);
        let ledger = Self {
            event_id,
            capacity,
            receiver,
            registered: std::collections::HashMap::new(),
            occupancy_tx,
        };
        let client = LedgerClient {
            sender,
            occupancy: occupancy_rx,
        };
        (ledger, client)
    }

    /// Runs the ledger loop until every client handle is dropped.
    pub async fn run(mut self) {
        info!(ledger = %self.event_id, capacity = self.capacity, "slot ledger opened");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::TryInsert {
                    user_id,
                    created_at,
                    reply,
                } => {
                    // A holder asking again is a duplicate even when the
                    // event is full.
                    let outcome = if self.registered.contains_key(&user_id) {
                        InsertOutcome::Duplicate
                    } else if self.registered.len() as u32 >= self.capacity {
                        InsertOutcome::CapacityExceeded
                    } else {
                        self.registered.insert(
                            user_id,
                            Registration {
                                user_id,
                                event_id: self.event_id,
                                created_at,
                            },
                        );
                        self.publish_occupancy();
                        InsertOutcome::Accepted
                    };
                    debug!(
                        ledger = %self.event_id,
                        %user_id,
                        ?outcome,
                        taken = self.registered.len(),
                        "admission decided"
                    );
                    let _ = reply.send(outcome);
                }
                LedgerRequest::Remove { user_id, reply } => {
                    let outcome = match self.registered.remove(&user_id) {
                        Some(_) => {
                            self.publish_occupancy();
                            DeleteOutcome::Deleted
                        }
                        None => DeleteOutcome::NotFound,
                    };
                    debug!(
                        ledger = %self.event_id,
                        %user_id,
                        ?outcome,
                        taken = self.registered.len(),
                        "cancellation decided"
                    );
                    let _ = reply.send(outcome);
                }
                LedgerRequest::Snapshot { reply } => {
                    let all: Vec<Registration> = self.registered.values().cloned().collect();
                    let _ = reply.send(all);
                }
            }
        }

        info!(ledger = %self.event_id, taken = self.registered.len(), "slot ledger closed");
    }

    fn publish_occupancy(&self) {
        self.occupancy_tx.send_replace(self.registered.len() as u32);
    }
}

/// Handle for one event's slot ledger.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
    occupancy: watch::Receiver<u32>,
}

impl LedgerClient {
    /// Attempts to claim a slot. Mailbox saturation surfaces as
    /// [`RegistryError::Conflict`] after the bounded send retries.
    pub async fn try_insert(
        &self,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<InsertOutcome, RegistryError> {
        let (reply, response) = oneshot::channel();
        let permit = acquire_permit(&self.sender).await?;
        permit.send(LedgerRequest::TryInsert {
            user_id,
            created_at,
            reply,
        });
        response
            .await
            .map_err(|_| RegistryError::Storage("slot ledger dropped the reply channel".into()))
    }

    /// Attempts to release a held slot.
    pub async fn remove(&self, user_id: UserId) -> Result<DeleteOutcome, RegistryError> {
        let (reply, response) = oneshot::channel();
        let permit = acquire_permit(&self.sender).await?;
        permit.send(LedgerRequest::Remove { user_id, reply });
        response
            .await
            .map_err(|_| RegistryError::Storage("slot ledger dropped the reply channel".into()))
    }

    /// A point-in-time copy of the ledger's registrations.
    pub async fn snapshot(&self) -> Result<Vec<Registration>, RegistryError> {
        let (reply, response) = oneshot::channel();
        let permit = acquire_permit(&self.sender).await?;
        permit.send(LedgerRequest::Snapshot { reply });
        response
            .await
            .map_err(|_| RegistryError::Storage("slot ledger dropped the reply channel".into()))
    }

    /// The most recently published registration count. Reads the watch
    /// channel only; never queues behind admissions. May lag a concurrent
    /// mutation by the time the caller looks at it.
    pub fn occupancy(&self) -> u32 {
        *self.occupancy.borrow()
    }
}
