//! # Turnstile
//!
//! Admission control for capacity-limited event registration: users claim
//! one of a fixed number of slots per event, may cancel to free the slot,
//! and callers can query live occupancy. The hard part is admitting
//! concurrent, possibly overlapping registrations without ever exceeding an
//! event's capacity, double-counting a user, or losing a slot on
//! cancellation.
//!
//! ## How the guarantees are enforced
//!
//! Every event gets its own [slot ledger](ledger::SlotLedger) actor. The
//! ledger owns the event's registrations and processes its mailbox
//! sequentially, so "is there a free slot, does this user already hold one,
//! insert" is a single uninterruptible step. Admissions for the same event
//! serialize in mailbox order; admissions for different events run on
//! different tasks and never wait on each other. Cancellation goes through
//! the same ledger, so it is mutually exclusive with admissions for that
//! event by construction.
//!
//! User and event metadata live in append-only catalog actors (from the
//! `catalog-actor` crate); email uniqueness is decided inside the user
//! directory's loop the same way slot admission is decided inside the
//! ledger's.
//!
//! ## Layers
//!
//! - [`model`] - plain data: [`model::User`], [`model::Event`],
//!   [`model::Registration`].
//! - [`users`] / [`events`] - the catalog actors for the two entity types.
//! - [`ledger`] - per-event slot ledgers and their supervisor.
//! - [`store`] - the [`store::EntityStore`] contract and its actor-backed
//!   implementation; the only storage surface the controllers see.
//! - [`admission`] / [`cancellation`] / [`occupancy`] - the three
//!   controllers.
//! - [`registry`] - wiring and the caller-facing operation surface.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use turnstile::model::{EventCreate, UserCreate};
//! use turnstile::registry::Registry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), turnstile::error::RegistryError> {
//!     let registry = Registry::new();
//!
//!     let user = registry
//!         .create_user(UserCreate {
//!             name: "Ada".into(),
//!             email: "ada@example.com".into(),
//!         })
//!         .await?;
//!     let event = registry
//!         .create_event(EventCreate {
//!             title: "RustConf".into(),
//!             datetime: Utc::now() + Duration::hours(24),
//!             location: "Portland".into(),
//!             capacity: 2,
//!         })
//!         .await?;
//!
//!     registry.register(user, event).await?;
//!     let stats = registry.stats(event).await?;
//!     assert_eq!(stats.total_registrations, 1);
//!
//!     registry.shutdown().await
//! }
//! ```

pub mod admission;
pub mod cancellation;
pub mod clients;
pub mod error;
pub mod events;
pub mod ledger;
pub mod model;
pub mod occupancy;
pub mod registry;
pub mod store;
pub mod users;

pub use error::RegistryError;
pub use occupancy::EventStats;
pub use registry::{EventDetails, Registry};
