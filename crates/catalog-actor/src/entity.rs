//! # CatalogEntity Trait
//!
//! The contract an entity type must satisfy to live in a [`CatalogActor`].
//! Associated types pin down the id, the creation payload, the runtime
//! context, and the error type, so a catalog of users can never be handed an
//! event payload by mistake.
//!
//! # Hook ordering
//!
//! On a create request the actor runs, in order and all inside its own loop:
//!
//! 1. [`CatalogEntity::validate_create`] against every existing entry;
//! 2. [`CatalogEntity::from_create_params`] to build the entity;
//! 3. [`CatalogEntity::on_create`] with the injected context.
//!
//! Because the loop processes one message at a time, step 1 and the final
//! insert are a single atomic unit: a uniqueness rule checked in
//! `validate_create` cannot be invalidated by a racing create.
//!
//! [`CatalogActor`]: crate::actor::CatalogActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract for entities managed by a catalog actor.
///
/// Catalog entries are immutable once created, so the trait has no update or
/// delete hooks; admission (creation) is the only mutation a catalog knows.
///
/// # Design note: one error type per entity
///
/// Each entity declares a single `Error` covering everything its hooks can
/// reject. The union is coarser than per-hook error types but keeps client
/// signatures uniform, and callers can still match on the variants they care
/// about.
#[async_trait]
pub trait CatalogEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. `From<u32>` lets the actor mint ids from its
    /// internal counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new entry.
    type Create: Send + Sync + Debug;

    /// Runtime dependencies injected via [`CatalogActor::run`]. Use `()`
    /// when the entity needs none.
    ///
    /// [`CatalogActor::run`]: crate::actor::CatalogActor::run
    type Context: Send + Sync;

    /// Error type for rejected creations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its freshly minted id and the creation payload.
    /// Field-level validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Collection-wide admission check, run inside the actor loop before the
    /// entity is built. `existing` iterates every entry already in the
    /// catalog; uniqueness rules enforced here hold under any interleaving
    /// of concurrent create calls.
    fn validate_create(
        _params: &Self::Create,
        _existing: &mut dyn Iterator<Item = &Self>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after construction, before the entry becomes visible. This is
    /// where an entity reaches out to other actors via the context; an error
    /// here aborts the creation.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
