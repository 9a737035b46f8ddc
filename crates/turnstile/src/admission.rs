//! Admission control: deciding whether a registration may claim a slot.

use crate::error::RegistryError;
use crate::ledger::InsertOutcome;
use crate::model::{EventId, UserId};
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Decides registration attempts against the capacity and duplicate rules.
///
/// The controller validates the referenced entities and the event's start
/// instant, then delegates the actual decision to the store's atomic
/// conditional insert. It holds no state of its own, so any number of
/// concurrent `register` calls are safe; the store serializes the ones that
/// contend for the same event.
pub struct AdmissionController {
    store: Arc<dyn EntityStore>,
}

impl AdmissionController {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Registers `user_id` for `event_id`, evaluating the past-event rule
    /// against `now`.
    ///
    /// An event whose start instant equals `now` exactly is still open for
    /// registration; only a strictly earlier start refuses with
    /// [`RegistryError::PastEvent`].
    ///
    /// # Errors
    ///
    /// [`RegistryError::UserNotFound`] / [`RegistryError::EventNotFound`]
    /// for dangling references, [`RegistryError::PastEvent`] after the start
    /// instant, [`RegistryError::CapacityExceeded`] when every slot is
    /// taken, [`RegistryError::AlreadyRegistered`] for a repeated claim, and
    /// [`RegistryError::Conflict`] when the event's ledger mailbox stayed
    /// saturated through the bounded send retries.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        user_id: UserId,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(RegistryError::UserNotFound(user_id));
        }
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or(RegistryError::EventNotFound(event_id))?;
        if event.is_past(now) {
            debug!(%user_id, %event_id, "refused, event already started");
            return Err(RegistryError::PastEvent(event_id));
        }

        match self
            .store
            .try_insert_registration(user_id, event_id, now)
            .await?
        {
            InsertOutcome::Accepted => {
                info!(%user_id, %event_id, "registration accepted");
                Ok(())
            }
            InsertOutcome::CapacityExceeded => {
                debug!(%user_id, %event_id, "refused, no free slot");
                Err(RegistryError::CapacityExceeded(event_id))
            }
            InsertOutcome::Duplicate => {
                debug!(%user_id, %event_id, "refused, already registered");
                Err(RegistryError::AlreadyRegistered { user_id, event_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::DeleteOutcome;
    use crate::model::{Event, Registration, User};
    use async_trait::async_trait;
    use chrono::Duration;

    /// Store double with canned answers; the conditional insert records
    /// nothing and just replies with the scripted outcome.
    struct StubStore {
        user: Option<User>,
        event: Option<Event>,
        insert: Result<InsertOutcome, RegistryError>,
    }

    impl StubStore {
        fn new(insert: Result<InsertOutcome, RegistryError>) -> Self {
            let datetime = Utc::now() + Duration::hours(1);
            Self {
                user: Some(User {
                    id: UserId(1),
                    name: "Ada".into(),
                    email: "ada@example.com".into(),
                }),
                event: Some(Event {
                    id: EventId(1),
                    title: "RustConf".into(),
                    datetime,
                    location: "Portland".into(),
                    capacity: 2,
                }),
                insert,
            }
        }
    }

    #[async_trait]
    impl EntityStore for StubStore {
        async fn get_user(&self, _id: UserId) -> Result<Option<User>, RegistryError> {
            Ok(self.user.clone())
        }

        async fn get_event(&self, _id: EventId) -> Result<Option<Event>, RegistryError> {
            Ok(self.event.clone())
        }

        async fn list_events(&self) -> Result<Vec<Event>, RegistryError> {
            Ok(self.event.clone().into_iter().collect())
        }

        async fn count_registrations(&self, _event_id: EventId) -> Result<u32, RegistryError> {
            Ok(0)
        }

        async fn exists_registration(
            &self,
            _user_id: UserId,
            _event_id: EventId,
        ) -> Result<bool, RegistryError> {
            Ok(false)
        }

        async fn try_insert_registration(
            &self,
            _user_id: UserId,
            _event_id: EventId,
            _created_at: DateTime<Utc>,
        ) -> Result<InsertOutcome, RegistryError> {
            match &self.insert {
                Ok(outcome) => Ok(*outcome),
                Err(RegistryError::Storage(msg)) => Err(RegistryError::Storage(msg.clone())),
                Err(_) => Err(RegistryError::Storage("unexpected stub error".into())),
            }
        }

        async fn delete_registration(
            &self,
            _user_id: UserId,
            _event_id: EventId,
        ) -> Result<DeleteOutcome, RegistryError> {
            Ok(DeleteOutcome::NotFound)
        }

        async fn registrations_for(
            &self,
            _event_id: EventId,
        ) -> Result<Vec<Registration>, RegistryError> {
            Ok(Vec::new())
        }
    }

    fn controller(stub: StubStore) -> AdmissionController {
        AdmissionController::new(Arc::new(stub))
    }

    #[tokio::test]
    async fn unknown_user_is_refused_before_the_ledger_is_touched() {
        let mut stub = StubStore::new(Ok(InsertOutcome::Accepted));
        stub.user = None;
        let err = controller(stub)
            .register(UserId(1), EventId(1), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::UserNotFound(UserId(1))));
    }

    #[tokio::test]
    async fn unknown_event_is_refused() {
        let mut stub = StubStore::new(Ok(InsertOutcome::Accepted));
        stub.event = None;
        let err = controller(stub)
            .register(UserId(1), EventId(1), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::EventNotFound(EventId(1))));
    }

    #[tokio::test]
    async fn started_event_is_refused_regardless_of_free_slots() {
        let stub = StubStore::new(Ok(InsertOutcome::Accepted));
        let after_start = stub.event.as_ref().unwrap().datetime + Duration::seconds(1);
        let err = controller(stub)
            .register(UserId(1), EventId(1), after_start)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::PastEvent(EventId(1))));
    }

    #[tokio::test]
    async fn start_instant_itself_is_still_open() {
        let stub = StubStore::new(Ok(InsertOutcome::Accepted));
        let at_start = stub.event.as_ref().unwrap().datetime;
        controller(stub)
            .register(UserId(1), EventId(1), at_start)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn insert_outcomes_map_to_their_errors() {
        let err = controller(StubStore::new(Ok(InsertOutcome::CapacityExceeded)))
            .register(UserId(1), EventId(1), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::CapacityExceeded(EventId(1))));

        let err = controller(StubStore::new(Ok(InsertOutcome::Duplicate)))
            .register(UserId(1), EventId(1), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AlreadyRegistered {
                user_id: UserId(1),
                event_id: EventId(1)
            }
        ));
    }

    #[tokio::test]
    async fn storage_failures_surface_unchanged() {
        let stub = StubStore::new(Err(RegistryError::Storage("ledger lost".into())));
        let err = controller(stub)
            .register(UserId(1), EventId(1), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Storage(msg) if msg.contains("ledger lost")));
    }
}
