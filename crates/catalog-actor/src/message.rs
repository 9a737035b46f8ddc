//! # Catalog Messages
//!
//! The message vocabulary between a [`CatalogClient`] and its actor. Each
//! request carries a oneshot sender for the reply, so every call has exactly
//! one response and an abandoned caller simply drops its receiver.
//!
//! The set is intentionally small: catalogs admit new entries, look entries
//! up, and enumerate themselves. There is no update and no delete; entries
//! are immutable for their lifetime.
//!
//! [`CatalogClient`]: crate::client::CatalogClient

use crate::entity::CatalogEntity;
use crate::error::CatalogError;
use tokio::sync::oneshot;

/// Reply channel carried inside every request.
pub type Reply<T> = oneshot::Sender<Result<T, CatalogError>>;

/// Requests a catalog actor understands.
#[derive(Debug)]
pub enum CatalogRequest<T: CatalogEntity> {
    /// Admit a new entry. Replies with the minted id, or the entity's own
    /// error when validation or construction rejects the payload.
    Create {
        params: T::Create,
        reply: Reply<T::Id>,
    },
    /// Fetch a clone of one entry by id.
    Get { id: T::Id, reply: Reply<Option<T>> },
    /// Fetch a clone of every entry. Order is unspecified.
    List { reply: Reply<Vec<T>> },
}
