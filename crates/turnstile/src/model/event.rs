use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Smallest capacity an event may announce.
pub const CAPACITY_MIN: u32 = 1;

/// Largest capacity an event may announce.
pub const CAPACITY_MAX: u32 = 1000;

/// Type-safe identifier for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event_{}", self.0)
    }
}

/// A capacity-limited happening users can register for.
///
/// Immutable after creation. The registration ledger for the event lives in
/// its own actor; `capacity` here is the limit that ledger enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub location: String,
    pub capacity: u32,
}

impl Event {
    /// Whether the event's start instant lies strictly before `now`.
    /// An event starting exactly at `now` is not yet past.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.datetime < now
    }
}

/// Payload for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub location: String,
    pub capacity: u32,
}
