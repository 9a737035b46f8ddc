//! # CatalogHandle Trait
//!
//! Shared plumbing for domain-specific client wrappers. A wrapper names its
//! inner [`CatalogClient`] and how framework errors map into its own error
//! type; `get` and `list` come for free.

use crate::{CatalogClient, CatalogEntity, CatalogError};
use async_trait::async_trait;

/// Trait for domain clients wrapping a generic [`CatalogClient`].
///
/// ```rust
/// use catalog_actor::{CatalogClient, CatalogEntity, CatalogError, CatalogHandle};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u32 }
/// #[derive(Debug)] struct TagCreate;
/// #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
///
/// #[async_trait]
/// impl CatalogEntity for Tag {
///     type Id = u32;
///     type Create = TagCreate;
///     type Context = ();
///     type Error = TagError;
///     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
/// }
///
/// struct TagShelf { inner: CatalogClient<Tag> }
///
/// #[async_trait]
/// impl CatalogHandle<Tag> for TagShelf {
///     type Error = String;
///     fn inner(&self) -> &CatalogClient<Tag> { &self.inner }
///     fn map_error(e: CatalogError) -> String { e.to_string() }
/// }
///
/// async fn usage(shelf: TagShelf) {
///     // get() and list() are provided by the trait.
///     let _ = shelf.get(1).await;
///     let _ = shelf.list().await;
/// }
/// ```
#[async_trait]
pub trait CatalogHandle<T: CatalogEntity>: Send + Sync {
    /// The wrapper's error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CatalogClient<T>;

    /// Map framework errors into the wrapper's error type.
    fn map_error(e: CatalogError) -> Self::Error;

    /// Fetch one entry by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("sending get");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entry.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("sending list");
        self.inner().list().await.map_err(Self::map_error)
    }
}
