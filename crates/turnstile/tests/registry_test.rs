//! End-to-end flows through the registry facade.

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::Barrier;
use tokio::task::JoinSet;
use turnstile::model::{EventCreate, EventId, UserCreate};
use turnstile::{Registry, RegistryError};

fn event_at(title: &str, location: &str, datetime: chrono::DateTime<Utc>) -> EventCreate {
    EventCreate {
        title: title.into(),
        datetime,
        location: location.into(),
        capacity: 10,
    }
}

#[tokio::test]
async fn full_lifecycle_from_signup_to_roster() {
    let registry = Registry::new();

    let ada = registry
        .create_user(UserCreate {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        })
        .await
        .unwrap();
    let grace = registry
        .create_user(UserCreate {
            name: "Grace".into(),
            email: "grace@example.com".into(),
        })
        .await
        .unwrap();

    let start = Utc::now() + Duration::hours(24);
    let event_id = registry
        .create_event(event_at("RustConf", "Portland", start))
        .await
        .unwrap();

    // Deterministic clocks so the roster order is fixed.
    let t0 = Utc::now();
    registry.register_at(ada, event_id, t0).await.unwrap();
    registry
        .register_at(grace, event_id, t0 + Duration::seconds(1))
        .await
        .unwrap();

    let details = registry.event_details(event_id).await.unwrap();
    assert_eq!(details.event.title, "RustConf");
    let names: Vec<&str> = details
        .registered_users
        .iter()
        .map(|u| u.name.as_str())
        .collect();
    assert_eq!(names, ["Ada", "Grace"]);

    let stats = registry.stats(event_id).await.unwrap();
    assert_eq!(stats.total_registrations, 2);
    assert_eq!(stats.remaining_capacity, 8);
    assert_eq!(stats.percentage_used, 20.0);
}

#[tokio::test]
async fn upcoming_events_sort_by_start_then_location() {
    let registry = Registry::new();
    let t = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();

    registry
        .create_event(event_at("One", "B", t + Duration::hours(1)))
        .await
        .unwrap();
    registry
        .create_event(event_at("Two", "A", t + Duration::hours(1)))
        .await
        .unwrap();
    registry
        .create_event(event_at("Three", "C", t + Duration::hours(2)))
        .await
        .unwrap();
    // Already started by `t`; must not appear.
    registry
        .create_event(event_at("Gone", "Z", t - Duration::hours(1)))
        .await
        .unwrap();

    let upcoming = registry.list_upcoming_at(t).await.unwrap();
    let keys: Vec<(&str, &str)> = upcoming
        .iter()
        .map(|e| (e.location.as_str(), e.title.as_str()))
        .collect();
    assert_eq!(keys, [("A", "Two"), ("B", "One"), ("C", "Three")]);
}

#[tokio::test]
async fn stats_for_an_unknown_event_is_not_found() {
    let registry = Registry::new();
    let err = registry.stats(EventId(42)).await.unwrap_err();
    assert!(matches!(err, RegistryError::EventNotFound(EventId(42))));

    let err = registry.event_details(EventId(42)).await.unwrap_err();
    assert!(matches!(err, RegistryError::EventNotFound(EventId(42))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_email_cannot_sign_up_twice_even_concurrently() {
    let registry = Arc::new(Registry::new());

    let barrier = Arc::new(Barrier::new(2));
    let mut signups = JoinSet::new();
    for n in 0..2 {
        let registry = registry.clone();
        let barrier = barrier.clone();
        signups.spawn(async move {
            barrier.wait().await;
            registry
                .create_user(UserCreate {
                    name: format!("Claimant {n}"),
                    email: "shared@example.com".into(),
                })
                .await
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = signups.join_next().await {
        outcomes.push(joined.expect("signup task panicked"));
    }

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = outcomes.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loser.as_ref().unwrap_err(),
        RegistryError::DuplicateEmail(_)
    ));
}

#[tokio::test]
async fn remaining_capacity_never_goes_negative() {
    let registry = Registry::new();
    let event_id = registry
        .create_event(event_at("Tiny", "Nook", Utc::now() + Duration::hours(2)))
        .await
        .unwrap();

    for n in 0..12 {
        let user = registry
            .create_user(UserCreate {
                name: format!("N{n}"),
                email: format!("n{n}@example.com"),
            })
            .await
            .unwrap();
        let _ = registry.register(user, event_id).await;
    }

    let stats = registry.stats(event_id).await.unwrap();
    assert_eq!(stats.total_registrations, 10);
    assert_eq!(stats.remaining_capacity, 0);
}

#[tokio::test]
async fn shutdown_drains_cleanly_with_work_done() {
    let registry = Registry::new();
    let user = registry
        .create_user(UserCreate {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        })
        .await
        .unwrap();
    let event_id = registry
        .create_event(event_at("Fin", "Hall", Utc::now() + Duration::hours(1)))
        .await
        .unwrap();
    registry.register(user, event_id).await.unwrap();

    registry.shutdown().await.unwrap();
}
