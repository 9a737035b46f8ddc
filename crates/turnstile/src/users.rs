//! The user directory actor.
//!
//! Users live in a [`CatalogActor`]: created once, never edited, looked up
//! by id when admissions need to verify a registrant exists. Email
//! uniqueness is enforced in [`CatalogEntity::validate_create`], which the
//! catalog runs in the same loop iteration as the insert, so two concurrent
//! signups with one email cannot both win.

use crate::clients::UserDirectory;
use crate::error::RegistryError;
use crate::model::{User, UserCreate, UserId};
use async_trait::async_trait;
use catalog_actor::{CatalogActor, CatalogEntity};

/// Mailbox depth for the user directory.
const MAILBOX: usize = 32;

#[async_trait]
impl CatalogEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Context = ();
    type Error = RegistryError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(RegistryError::InvalidInput("name is required".into()));
        }
        if params.email.trim().is_empty() {
            return Err(RegistryError::InvalidInput("email is required".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
        })
    }

    fn validate_create(
        params: &UserCreate,
        existing: &mut dyn Iterator<Item = &Self>,
    ) -> Result<(), Self::Error> {
        let mut existing = existing;
        if (&mut existing).any(|u| u.email == params.email) {
            return Err(RegistryError::DuplicateEmail(params.email.clone()));
        }
        Ok(())
    }
}

/// Creates the user directory actor and its domain client.
pub fn new() -> (CatalogActor<User>, UserDirectory) {
    let (actor, client) = CatalogActor::<User>::new(MAILBOX);
    (actor, UserDirectory::new(client))
}
