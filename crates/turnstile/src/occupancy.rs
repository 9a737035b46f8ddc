//! Read-only occupancy reporting.
//!
//! Reports are plain reads over the store: permitted to lag concurrent
//! admissions by the time the caller looks at them, and guaranteed never to
//! mutate anything. A count above capacity cannot happen through the
//! admission path; if a report ever observes one it is logged as a defect
//! and clamped rather than returned as a negative remainder.

use crate::error::RegistryError;
use crate::model::{Event, EventId};
use crate::store::EntityStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, instrument};

/// Occupancy figures for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStats {
    pub total_registrations: u32,
    pub remaining_capacity: u32,
    /// Share of capacity in use, as a percentage rounded to two decimals.
    pub percentage_used: f64,
}

/// Read-only aggregate queries over events and their ledgers.
pub struct OccupancyReporter {
    store: Arc<dyn EntityStore>,
}

impl OccupancyReporter {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Occupancy snapshot for one event.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EventNotFound`] when the event does not exist.
    #[instrument(skip(self))]
    pub async fn stats(&self, event_id: EventId) -> Result<EventStats, RegistryError> {
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or(RegistryError::EventNotFound(event_id))?;
        let total = self.store.count_registrations(event_id).await?;

        if total > event.capacity {
            // The admission path makes this unreachable; seeing it means a
            // capacity invariant was broken somewhere else.
            error!(%event_id, total, capacity = event.capacity, "count exceeds capacity");
        }

        Ok(EventStats {
            total_registrations: total,
            remaining_capacity: event.capacity.saturating_sub(total),
            percentage_used: percentage(total, event.capacity),
        })
    }

    /// Events that have not started yet as of `now`, ordered by start
    /// instant, then location. Events equal on both keys keep the store's
    /// enumeration order, which is unspecified.
    #[instrument(skip(self))]
    pub async fn list_upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, RegistryError> {
        let mut upcoming: Vec<Event> = self
            .store
            .list_events()
            .await?
            .into_iter()
            .filter(|e| e.datetime > now)
            .collect();
        upcoming.sort_by(|a, b| {
            a.datetime
                .cmp(&b.datetime)
                .then_with(|| a.location.cmp(&b.location))
        });
        Ok(upcoming)
    }
}

/// Percentage of `capacity` in use, rounded to two decimal places.
fn percentage(total: u32, capacity: u32) -> f64 {
    let raw = f64::from(total) / f64::from(capacity) * 100.0;
    (raw * 100.0).round() / 100.0
}
