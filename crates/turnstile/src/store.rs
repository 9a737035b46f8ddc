//! The entity store contract and its actor-backed implementation.
//!
//! [`EntityStore`] is the seam between the admission core and storage. The
//! operations that matter are the conditional ones:
//! [`EntityStore::try_insert_registration`] decides capacity and duplicates
//! together with the insert, and [`EntityStore::delete_registration`]
//! decides existence together with the removal. Exposing only these
//! compound operations makes the racy alternative (read a count, then write
//! a record in a second step) inexpressible for callers.
//!
//! [`ActorStore`] implements the contract over the actors in this crate:
//! catalogs for users and events, one slot ledger per event. Count reads go
//! through the ledger's published watch value and stay out of mailbox
//! traffic entirely.

use crate::clients::{EventCatalog, UserDirectory};
use crate::error::RegistryError;
use crate::ledger::{DeleteOutcome, InsertOutcome, LedgerClient, SupervisorClient};
use crate::model::{Event, EventId, Registration, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage operations the admission core relies on.
///
/// Implementations must make `try_insert_registration` and
/// `delete_registration` atomic: the condition and the mutation are one
/// indivisible step with respect to concurrent calls for the same event.
/// Plain reads may be stale by the time the caller inspects them.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RegistryError>;

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, RegistryError>;

    async fn list_events(&self) -> Result<Vec<Event>, RegistryError>;

    /// Point-in-time registration count for an event. Zero when the event
    /// does not exist.
    async fn count_registrations(&self, event_id: EventId) -> Result<u32, RegistryError>;

    /// Whether `(user_id, event_id)` currently holds a slot.
    async fn exists_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<bool, RegistryError>;

    /// Inserts the registration only if, evaluated atomically with the
    /// insert, the event has a free slot and the user holds none on it.
    async fn try_insert_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
        created_at: DateTime<Utc>,
    ) -> Result<InsertOutcome, RegistryError>;

    /// Removes the registration if it exists, atomically with the existence
    /// decision.
    async fn delete_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<DeleteOutcome, RegistryError>;

    /// Point-in-time copy of an event's registrations. Empty when the event
    /// does not exist.
    async fn registrations_for(&self, event_id: EventId)
        -> Result<Vec<Registration>, RegistryError>;
}

/// [`EntityStore`] backed by the catalog actors and per-event slot ledgers.
#[derive(Clone)]
pub struct ActorStore {
    users: UserDirectory,
    events: EventCatalog,
    ledgers: SupervisorClient,
}

impl ActorStore {
    pub fn new(users: UserDirectory, events: EventCatalog, ledgers: SupervisorClient) -> Self {
        Self {
            users,
            events,
            ledgers,
        }
    }

    /// Finds the event's ledger. Creating an event opens its ledger before
    /// the id is handed out, so a missing ledger means a missing event; the
    /// open here only heals a supervisor that was restarted underneath us.
    async fn ledger_for(&self, event_id: EventId) -> Result<Option<LedgerClient>, RegistryError> {
        if let Some(ledger) = self.ledgers.lookup(event_id).await? {
            return Ok(Some(ledger));
        }
        match self.events.get_event(event_id).await? {
            Some(event) => Ok(Some(self.ledgers.open(event.id, event.capacity).await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EntityStore for ActorStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RegistryError> {
        self.users.get_user(id).await
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, RegistryError> {
        self.events.get_event(id).await
    }

    async fn list_events(&self) -> Result<Vec<Event>, RegistryError> {
        self.events.list_events().await
    }

    async fn count_registrations(&self, event_id: EventId) -> Result<u32, RegistryError> {
        match self.ledgers.lookup(event_id).await? {
            Some(ledger) => Ok(ledger.occupancy()),
            None => Ok(0),
        }
    }

    async fn exists_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<bool, RegistryError> {
        match self.ledgers.lookup(event_id).await? {
            Some(ledger) => {
                let snapshot = ledger.snapshot().await?;
                Ok(snapshot.iter().any(|r| r.user_id == user_id))
            }
            None => Ok(false),
        }
    }

    async fn try_insert_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
        created_at: DateTime<Utc>,
    ) -> Result<InsertOutcome, RegistryError> {
        match self.ledger_for(event_id).await? {
            Some(ledger) => ledger.try_insert(user_id, created_at).await,
            None => Err(RegistryError::EventNotFound(event_id)),
        }
    }

    async fn delete_registration(
        &self,
        user_id: UserId,
        event_id: EventId,
    ) -> Result<DeleteOutcome, RegistryError> {
        match self.ledgers.lookup(event_id).await? {
            Some(ledger) => ledger.remove(user_id).await,
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    async fn registrations_for(
        &self,
        event_id: EventId,
    ) -> Result<Vec<Registration>, RegistryError> {
        match self.ledgers.lookup(event_id).await? {
            Some(ledger) => ledger.snapshot().await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerSupervisor;
    use crate::model::{EventCreate, UserCreate};
    use crate::{events, users};
    use chrono::Duration;

    async fn wire() -> (ActorStore, UserId, EventId) {
        let (supervisor, ledgers) = LedgerSupervisor::new();
        tokio::spawn(supervisor.run());
        let (user_actor, users) = users::new();
        tokio::spawn(user_actor.run(()));
        let (event_actor, events) = events::new();
        tokio::spawn(event_actor.run(ledgers.clone()));

        let user_id = users
            .create_user(UserCreate {
                name: "Ada".into(),
                email: "ada@example.com".into(),
            })
            .await
            .unwrap();
        let event_id = events
            .create_event(EventCreate {
                title: "RustConf".into(),
                datetime: Utc::now() + Duration::hours(24),
                location: "Portland".into(),
                capacity: 2,
            })
            .await
            .unwrap();

        (ActorStore::new(users, events, ledgers), user_id, event_id)
    }

    #[tokio::test]
    async fn conditional_insert_observes_capacity_and_duplicates() {
        let (store, user_id, event_id) = wire().await;
        let now = Utc::now();

        assert_eq!(
            store
                .try_insert_registration(user_id, event_id, now)
                .await
                .unwrap(),
            InsertOutcome::Accepted
        );
        assert_eq!(
            store
                .try_insert_registration(user_id, event_id, now)
                .await
                .unwrap(),
            InsertOutcome::Duplicate
        );

        assert!(store.exists_registration(user_id, event_id).await.unwrap());
        assert_eq!(store.count_registrations(event_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_decides_existence_with_the_removal() {
        let (store, user_id, event_id) = wire().await;

        store
            .try_insert_registration(user_id, event_id, Utc::now())
            .await
            .unwrap();
        assert_eq!(
            store.delete_registration(user_id, event_id).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            store.delete_registration(user_id, event_id).await.unwrap(),
            DeleteOutcome::NotFound
        );
        assert!(!store.exists_registration(user_id, event_id).await.unwrap());
        assert_eq!(store.count_registrations(event_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_against_an_unknown_event_is_refused() {
        let (store, user_id, _event_id) = wire().await;

        let err = store
            .try_insert_registration(user_id, EventId(99), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::EventNotFound(EventId(99))));
    }

    #[tokio::test]
    async fn reads_against_an_unknown_event_are_empty() {
        let (store, user_id, _event_id) = wire().await;

        assert_eq!(store.count_registrations(EventId(99)).await.unwrap(), 0);
        assert!(!store.exists_registration(user_id, EventId(99)).await.unwrap());
        assert!(store.registrations_for(EventId(99)).await.unwrap().is_empty());
    }
}
