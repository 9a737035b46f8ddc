//! Cancellation: releasing a claimed slot.

use crate::error::RegistryError;
use crate::ledger::DeleteOutcome;
use crate::model::{EventId, UserId};
use crate::store::EntityStore;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Releases registrations through the store's atomic remove.
///
/// Existence is decided together with the removal, so two racing cancels
/// for the same pair resolve to exactly one success; the loser hears
/// [`RegistryError::NotRegistered`] and no count is decremented twice.
pub struct CancellationHandler {
    store: Arc<dyn EntityStore>,
}

impl CancellationHandler {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Cancels the registration of `user_id` on `event_id`. The freed slot
    /// is claimable by the time this returns.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotRegistered`] when no matching registration
    /// exists, including for events that were never created.
    #[instrument(skip(self))]
    pub async fn cancel(&self, user_id: UserId, event_id: EventId) -> Result<(), RegistryError> {
        match self.store.delete_registration(user_id, event_id).await? {
            DeleteOutcome::Deleted => {
                info!(%user_id, %event_id, "registration cancelled");
                Ok(())
            }
            DeleteOutcome::NotFound => {
                debug!(%user_id, %event_id, "nothing to cancel");
                Err(RegistryError::NotRegistered { user_id, event_id })
            }
        }
    }
}
