use super::{EventId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A claimed slot: one user on one event.
///
/// Identified by the `(user_id, event_id)` pair; created by admission,
/// destroyed by cancellation, never mutated in between. The authoritative
/// copy lives in the event's slot ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub user_id: UserId,
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
}
