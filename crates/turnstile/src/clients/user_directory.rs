//! Client for the user directory actor.

use crate::error::RegistryError;
use crate::model::{User, UserCreate, UserId};
use async_trait::async_trait;
use catalog_actor::{CatalogClient, CatalogError, CatalogHandle};
use tracing::instrument;

/// Handle for creating and looking up users.
#[derive(Clone)]
pub struct UserDirectory {
    inner: CatalogClient<User>,
}

impl UserDirectory {
    pub fn new(inner: CatalogClient<User>) -> Self {
        Self { inner }
    }

    /// Signs up a new user. Fails with [`RegistryError::DuplicateEmail`]
    /// when the email is taken, [`RegistryError::InvalidInput`] on blank
    /// fields.
    #[instrument(skip(self, params))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, RegistryError> {
        self.inner.create(params).await.map_err(Into::into)
    }

    /// Looks up one user by id.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, RegistryError> {
        self.get(id).await
    }
}

#[async_trait]
impl CatalogHandle<User> for UserDirectory {
    type Error = RegistryError;

    fn inner(&self) -> &CatalogClient<User> {
        &self.inner
    }

    fn map_error(e: CatalogError) -> Self::Error {
        e.into()
    }
}
