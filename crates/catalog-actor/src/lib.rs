//! # Catalog Actor
//!
//! Building blocks for actor-backed entity catalogs: append-only collections
//! of identified entities (think a user directory or an event listing) owned
//! by a single Tokio task and driven entirely by message passing.
//!
//! ## Why an actor per catalog?
//!
//! A catalog actor owns its entries outright and processes its mailbox
//! sequentially. Every handler body therefore runs atomically with respect to
//! the catalog state: a uniqueness check and the insert it guards happen in
//! the same handler invocation, and no concurrent caller can slip between
//! them. That property is what [`CatalogEntity::validate_create`] relies on,
//! and it is the reason this crate has no `Mutex` or `RwLock` anywhere.
//!
//! ## The three layers
//!
//! 1. **Entity layer** ([`CatalogEntity`]) - your domain type, its creation
//!    payload, and its admission rules.
//! 2. **Runtime layer** ([`CatalogActor`]) - the task that owns the entries
//!    and processes [`CatalogRequest`] messages one at a time.
//! 3. **Interface layer** ([`CatalogClient`]) - a cheap-to-clone handle that
//!    turns method calls into messages and awaits the oneshot reply.
//!
//! Catalogs are deliberately append-only: entries are immutable once created
//! and are never removed. State that changes over an entity's lifetime does
//! not belong in a catalog; give it its own actor.
//!
//! ## Bounded waiting
//!
//! Client sends never park on a full mailbox indefinitely. Each send attempts
//! to reserve a mailbox slot a small, fixed number of times with a doubling
//! backoff between attempts, then gives up with [`CatalogError::Overloaded`].
//! Callers decide whether to retry; the framework never does it for them.
//!
//! ## Context injection
//!
//! Dependencies reach entities at runtime through [`CatalogActor::run`], not
//! at construction time. An entity that must call another actor during
//! creation declares that client as its [`CatalogEntity::Context`] and
//! receives it in [`CatalogEntity::on_create`].
//!
//! ```rust
//! use catalog_actor::{CatalogActor, CatalogEntity};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Tag { id: u32, label: String }
//!
//! #[derive(Debug)]
//! struct TagCreate { label: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("label already taken")]
//! struct LabelTaken;
//!
//! #[async_trait]
//! impl CatalogEntity for Tag {
//!     type Id = u32;
//!     type Create = TagCreate;
//!     type Context = ();
//!     type Error = LabelTaken;
//!
//!     fn from_create_params(id: u32, params: TagCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: params.label })
//!     }
//!
//!     fn validate_create(
//!         params: &TagCreate,
//!         existing: &mut dyn Iterator<Item = &Self>,
//!     ) -> Result<(), Self::Error> {
//!         let mut existing = existing;
//!         if (&mut existing).any(|t| t.label == params.label) {
//!             return Err(LabelTaken);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = CatalogActor::<Tag>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TagCreate { label: "rust".into() }).await.unwrap();
//!     let tag = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(tag.label, "rust");
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides a scriptable [`mock::MockCatalog`] that
//! answers the same client API from a queue of expectations, so logic built
//! on top of a [`CatalogClient`] can be unit-tested without spawning actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod telemetry;

pub use actor::CatalogActor;
pub use client::CatalogClient;
pub use entity::CatalogEntity;
pub use error::CatalogError;
pub use handle::CatalogHandle;
pub use message::{CatalogRequest, Reply};
