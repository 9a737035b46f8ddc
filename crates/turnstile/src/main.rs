//! Demo scenario: an oversubscribed event.
//!
//! Wires the full registry, then pushes five users at a two-slot event
//! concurrently and walks through cancellation and re-registration,
//! logging every outcome. Run with `RUST_LOG=info cargo run` (or `debug`
//! to watch each ledger decision).

use catalog_actor::telemetry::setup_tracing;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn, Instrument};
use turnstile::model::{EventCreate, EventId, UserCreate, UserId};
use turnstile::{Registry, RegistryError};

async fn concurrent_rush(
    registry: &Arc<Registry>,
    user_ids: &[UserId],
    event_id: EventId,
) -> Result<Vec<(UserId, bool)>, RegistryError> {
    let mut attempts = JoinSet::new();
    for &user_id in user_ids {
        let registry = registry.clone();
        attempts.spawn(async move { (user_id, registry.register(user_id, event_id).await) });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = attempts.join_next().await {
        let (user_id, outcome) = joined
            .map_err(|e| RegistryError::Storage(format!("registration task failed: {e}")))?;
        match outcome {
            Ok(()) => {
                info!(%user_id, "got a slot");
                outcomes.push((user_id, true));
            }
            Err(e) => {
                warn!(%user_id, reason = %e, "turned away");
                outcomes.push((user_id, false));
            }
        }
    }
    Ok(outcomes)
}

#[tokio::main]
async fn main() -> Result<(), RegistryError> {
    setup_tracing();

    info!("starting registration demo");
    let registry = Registry::new();

    // Five hopefuls, two slots.
    let mut user_ids = Vec::new();
    for name in ["Ada", "Grace", "Edsger", "Barbara", "Tony"] {
        let id = registry
            .create_user(UserCreate {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .await?;
        user_ids.push(id);
    }
    info!(users = user_ids.len(), "users created");

    let event_id = registry
        .create_event(EventCreate {
            title: "Workshop: Fearless Concurrency".into(),
            datetime: Utc::now() + Duration::hours(24),
            location: "Room 101".into(),
            capacity: 2,
        })
        .await?;
    info!(%event_id, capacity = 2, "event created");

    let registry = Arc::new(registry);

    // Everyone tries at once; the ledger admits exactly two.
    let outcomes = concurrent_rush(&registry, &user_ids, event_id)
        .instrument(tracing::info_span!("concurrent_rush"))
        .await?;

    let stats = registry.stats(event_id).await?;
    info!(
        total = stats.total_registrations,
        remaining = stats.remaining_capacity,
        percentage = stats.percentage_used,
        "after the rush"
    );

    // One attendee drops out; a latecomer claims the freed slot.
    let leaver = outcomes.iter().find(|(_, won)| *won).map(|(u, _)| *u);
    let latecomer = outcomes.iter().find(|(_, won)| !*won).map(|(u, _)| *u);
    if let (Some(leaver), Some(latecomer)) = (leaver, latecomer) {
        registry.cancel(leaver, event_id).await?;
        info!(user_id = %leaver, "cancelled");

        registry.register(latecomer, event_id).await?;
        info!(user_id = %latecomer, "claimed the freed slot");
    }

    let details = registry.event_details(event_id).await?;
    info!(
        title = %details.event.title,
        attendees = details.registered_users.len(),
        "final roster"
    );

    for event in registry.list_upcoming().await? {
        info!(%event.id, %event.title, %event.location, "upcoming");
    }

    match Arc::into_inner(registry) {
        Some(registry) => registry.shutdown().await?,
        None => warn!("registry still shared, skipping graceful shutdown"),
    }
    info!("demo complete");
    Ok(())
}
