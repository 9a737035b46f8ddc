//! Error taxonomy for the registration core.
//!
//! One enum covers every way an operation can fail, so a variant names the
//! exact rule that was at stake: callers match on `CapacityExceeded` or
//! `AlreadyRegistered` instead of parsing a message. Business-rule
//! rejections are deterministic given current state and are never retried
//! internally; only `Conflict` marks a transient condition worth retrying
//! from the caller's side.

use crate::model::{EventId, UserId};
use catalog_actor::CatalogError;
use thiserror::Error;

/// Everything the registration core can refuse to do, and why.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed or out-of-range input; the caller's request can never
    /// succeed as written.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A user with this email already exists.
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The referenced event does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The event's start instant has already passed.
    #[error("{0} has already started")]
    PastEvent(EventId),

    /// Every slot on the event is taken.
    #[error("{0} is at capacity")]
    CapacityExceeded(EventId),

    /// The user already holds a slot on this event.
    #[error("{user_id} is already registered for {event_id}")]
    AlreadyRegistered { user_id: UserId, event_id: EventId },

    /// The user holds no slot on this event.
    #[error("{user_id} is not registered for {event_id}")]
    NotRegistered { user_id: UserId, event_id: EventId },

    /// Transient contention (a saturated mailbox); retryable by the caller
    /// with backoff.
    #[error("transient contention: {0}")]
    Conflict(String),

    /// Unexpected storage-layer failure, surfaced as-is.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<CatalogError> for RegistryError {
    fn from(e: CatalogError) -> Self {
        match e {
            // Entity hooks raise RegistryError; recover the typed value.
            CatalogError::Entity(inner) => match inner.downcast::<RegistryError>() {
                Ok(domain) => *domain,
                Err(other) => RegistryError::Storage(other.to_string()),
            },
            CatalogError::Overloaded(attempts) => RegistryError::Conflict(format!(
                "mailbox stayed full after {attempts} attempts"
            )),
            CatalogError::ActorClosed | CatalogError::ActorDropped | CatalogError::NotFound(_) => {
                RegistryError::Storage(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_errors_downcast_to_their_domain_variant() {
        let boxed = CatalogError::Entity(Box::new(RegistryError::DuplicateEmail(
            "ada@example.com".into(),
        )));
        match RegistryError::from(boxed) {
            RegistryError::DuplicateEmail(email) => assert_eq!(email, "ada@example.com"),
            other => panic!("expected DuplicateEmail, got {other:?}"),
        }
    }

    #[test]
    fn foreign_entity_errors_become_storage_failures() {
        let boxed = CatalogError::Entity(Box::new(std::io::Error::other("disk on fire")));
        match RegistryError::from(boxed) {
            RegistryError::Storage(msg) => assert!(msg.contains("disk on fire")),
            other => panic!("expected Storage, got {other:?}"),
        }
    }

    #[test]
    fn overload_maps_to_conflict() {
        match RegistryError::from(CatalogError::Overloaded(4)) {
            RegistryError::Conflict(msg) => assert!(msg.contains('4')),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }
}
