//! The event catalog actor.
//!
//! Event metadata is immutable once created, so events fit the append-only
//! catalog shape. The interesting part is `on_create`: before a new event
//! becomes visible, it asks the ledger supervisor to open the slot ledger
//! that will police its capacity. An event id can therefore never be handed
//! to a caller while its ledger does not exist yet.

use crate::clients::EventCatalog;
use crate::error::RegistryError;
use crate::ledger::SupervisorClient;
use crate::model::{Event, EventCreate, EventId, CAPACITY_MAX, CAPACITY_MIN};
use async_trait::async_trait;
use catalog_actor::{CatalogActor, CatalogEntity};

/// Mailbox depth for the event catalog.
const MAILBOX: usize = 32;

#[async_trait]
impl CatalogEntity for Event {
    type Id = EventId;
    type Create = EventCreate;
    type Context = SupervisorClient;
    type Error = RegistryError;

    fn from_create_params(id: EventId, params: EventCreate) -> Result<Self, Self::Error> {
        if params.title.trim().is_empty() {
            return Err(RegistryError::InvalidInput("title is required".into()));
        }
        if params.location.trim().is_empty() {
            return Err(RegistryError::InvalidInput("location is required".into()));
        }
        if !(CAPACITY_MIN..=CAPACITY_MAX).contains(&params.capacity) {
            return Err(RegistryError::InvalidInput(format!(
                "capacity must be between {CAPACITY_MIN} and {CAPACITY_MAX}, got {}",
                params.capacity
            )));
        }
        Ok(Self {
            id,
            title: params.title,
            datetime: params.datetime,
            location: params.location,
            capacity: params.capacity,
        })
    }

    async fn on_create(&mut self, ledgers: &SupervisorClient) -> Result<(), Self::Error> {
        ledgers.open(self.id, self.capacity).await?;
        Ok(())
    }
}

/// Creates the event catalog actor and its domain client.
pub fn new() -> (CatalogActor<Event>, EventCatalog) {
    let (actor, client) = CatalogActor::<Event>::new(MAILBOX);
    (actor, EventCatalog::new(client))
}
