//! System wiring and the caller-facing facade.
//!
//! [`Registry::new`] is the conductor: it creates every actor, injects their
//! dependencies, and spawns them. The rest of the type is the operation
//! surface a transport layer (HTTP, RPC, a test) calls into; no other
//! entry point into the system exists.

use crate::admission::AdmissionController;
use crate::cancellation::CancellationHandler;
use crate::clients::{EventCatalog, UserDirectory};
use crate::error::RegistryError;
use crate::events;
use crate::ledger::LedgerSupervisor;
use crate::model::{Event, EventCreate, EventId, User, UserCreate, UserId};
use crate::occupancy::{EventStats, OccupancyReporter};
use crate::store::{ActorStore, EntityStore};
use crate::users;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// An event together with everyone registered for it.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub event: Event,
    pub registered_users: Vec<User>,
}

/// The wired registration system.
///
/// Construct with [`Registry::new`] from inside a Tokio runtime; every
/// actor runs as its own task. Dropping the registry (or calling
/// [`Registry::shutdown`]) closes the actors' mailboxes and lets them
/// drain.
pub struct Registry {
    users: UserDirectory,
    events: EventCatalog,
    store: Arc<dyn EntityStore>,
    admission: AdmissionController,
    cancellation: CancellationHandler,
    occupancy: OccupancyReporter,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Registry {
    /// Creates and starts the whole system: the user directory, the event
    /// catalog, the ledger supervisor, and the controllers on top.
    pub fn new() -> Self {
        let (supervisor, ledgers) = LedgerSupervisor::new();
        let supervisor_handle = tokio::spawn(supervisor.run());

        let (user_actor, users) = users::new();
        let user_handle = tokio::spawn(user_actor.run(()));

        // The event catalog needs the supervisor so each new event can open
        // its slot ledger before the event becomes visible.
        let (event_actor, events) = events::new();
        let event_handle = tokio::spawn(event_actor.run(ledgers.clone()));

        let store: Arc<dyn EntityStore> =
            Arc::new(ActorStore::new(users.clone(), events.clone(), ledgers));

        info!("registry started");

        Self {
            users,
            events,
            admission: AdmissionController::new(store.clone()),
            cancellation: CancellationHandler::new(store.clone()),
            occupancy: OccupancyReporter::new(store.clone()),
            store,
            handles: vec![supervisor_handle, user_handle, event_handle],
        }
    }

    /// Signs up a new user.
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, RegistryError> {
        self.users.create_user(params).await
    }

    /// Announces a new event.
    pub async fn create_event(&self, params: EventCreate) -> Result<EventId, RegistryError> {
        self.events.create_event(params).await
    }

    /// Registers a user for an event, evaluated against the current time.
    pub async fn register(&self, user_id: UserId, event_id: EventId) -> Result<(), RegistryError> {
        self.admission.register(user_id, event_id, Utc::now()).await
    }

    /// Registers with an explicit evaluation instant. Intended for tests
    /// and replays that need a deterministic clock.
    pub async fn register_at(
        &self,
        user_id: UserId,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        self.admission.register(user_id, event_id, now).await
    }

    /// Cancels a registration, freeing its slot.
    pub async fn cancel(&self, user_id: UserId, event_id: EventId) -> Result<(), RegistryError> {
        self.cancellation.cancel(user_id, event_id).await
    }

    /// One event with its registered users, earliest registration first.
    pub async fn event_details(&self, event_id: EventId) -> Result<EventDetails, RegistryError> {
        let event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or(RegistryError::EventNotFound(event_id))?;

        let mut registrations = self.store.registrations_for(event_id).await?;
        registrations.sort_by_key(|r| r.created_at);

        let mut registered_users = Vec::with_capacity(registrations.len());
        for registration in registrations {
            match self.users.get_user(registration.user_id).await? {
                Some(user) => registered_users.push(user),
                // Users are never deleted, so a dangling reference means
                // the directory and a ledger disagree.
                None => warn!(user_id = %registration.user_id, %event_id, "registration references unknown user"),
            }
        }

        Ok(EventDetails {
            event,
            registered_users,
        })
    }

    /// Events that have not started yet, ordered by start instant, then
    /// location.
    pub async fn list_upcoming(&self) -> Result<Vec<Event>, RegistryError> {
        self.occupancy.list_upcoming(Utc::now()).await
    }

    /// [`Registry::list_upcoming`] with an explicit clock, for tests.
    pub async fn list_upcoming_at(&self, now: DateTime<Utc>) -> Result<Vec<Event>, RegistryError> {
        self.occupancy.list_upcoming(now).await
    }

    /// Occupancy snapshot for one event.
    pub async fn stats(&self, event_id: EventId) -> Result<EventStats, RegistryError> {
        self.occupancy.stats(event_id).await
    }

    /// Shuts the system down: drops every client handle so the actors see
    /// closed mailboxes, then waits for the spawned tasks to finish
    /// draining.
    pub async fn shutdown(self) -> Result<(), RegistryError> {
        info!("registry shutting down");

        let Self {
            users,
            events,
            store,
            admission,
            cancellation,
            occupancy,
            handles,
        } = self;
        drop(admission);
        drop(cancellation);
        drop(occupancy);
        drop(store);
        drop(users);
        drop(events);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "actor task failed during shutdown");
                return Err(RegistryError::Storage(format!(
                    "actor task failed during shutdown: {e}"
                )));
            }
        }

        info!("registry shutdown complete");
        Ok(())
    }
}
