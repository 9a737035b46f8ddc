//! Client for the event catalog actor.

use crate::error::RegistryError;
use crate::model::{Event, EventCreate, EventId};
use async_trait::async_trait;
use catalog_actor::{CatalogClient, CatalogError, CatalogHandle};
use tracing::instrument;

/// Handle for creating and looking up events.
#[derive(Clone)]
pub struct EventCatalog {
    inner: CatalogClient<Event>,
}

impl EventCatalog {
    pub fn new(inner: CatalogClient<Event>) -> Self {
        Self { inner }
    }

    /// Announces a new event. By the time the id is returned, the event's
    /// slot ledger exists and is enforcing the capacity.
    #[instrument(skip(self, params))]
    pub async fn create_event(&self, params: EventCreate) -> Result<EventId, RegistryError> {
        self.inner.create(params).await.map_err(Into::into)
    }

    /// Looks up one event by id.
    pub async fn get_event(&self, id: EventId) -> Result<Option<Event>, RegistryError> {
        self.get(id).await
    }

    /// Every event ever created, in unspecified order.
    pub async fn list_events(&self) -> Result<Vec<Event>, RegistryError> {
        self.list().await
    }
}

#[async_trait]
impl CatalogHandle<Event> for EventCatalog {
    type Error = RegistryError;

    fn inner(&self) -> &CatalogClient<Event> {
        &self.inner
    }

    fn map_error(e: CatalogError) -> Self::Error {
        e.into()
    }
}
