//! # Catalog Client
//!
//! The caller-facing half of a catalog. A [`CatalogClient`] holds only the
//! mailbox sender, so cloning is cheap and handles can be passed freely
//! between tasks.
//!
//! ## Send discipline
//!
//! Every request goes through [`acquire_permit`]: try to reserve a mailbox
//! slot, and if the mailbox is full, sleep with a doubling backoff and try
//! again, a fixed number of times. A mailbox that stays full the whole way
//! through yields [`CatalogError::Overloaded`] instead of an unbounded wait.
//! Other actor clients in this workspace reuse the same helper so the
//! backoff policy lives in one place.

use crate::entity::CatalogEntity;
use crate::error::CatalogError;
use crate::message::CatalogRequest;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

/// Attempts made to reserve a mailbox slot before giving up.
pub const SEND_ATTEMPTS: u32 = 4;

/// Sleep before the second attempt; doubles on each subsequent one.
pub const SEND_BACKOFF: Duration = Duration::from_millis(5);

/// Reserves a mailbox slot with bounded retry.
///
/// Backoff schedule with the default constants: 5ms, 10ms, 20ms between the
/// four attempts, roughly 35ms worst case before `Overloaded` surfaces.
pub async fn acquire_permit<M>(
    sender: &mpsc::Sender<M>,
) -> Result<mpsc::Permit<'_, M>, CatalogError> {
    for attempt in 0..SEND_ATTEMPTS {
        match sender.try_reserve() {
            Ok(permit) => return Ok(permit),
            Err(TrySendError::Closed(())) => return Err(CatalogError::ActorClosed),
            Err(TrySendError::Full(())) => {
                if attempt + 1 < SEND_ATTEMPTS {
                    tokio::time::sleep(SEND_BACKOFF * 2u32.pow(attempt)).await;
                }
            }
        }
    }
    Err(CatalogError::Overloaded(SEND_ATTEMPTS))
}

/// Type-safe handle for one catalog actor.
#[derive(Clone)]
pub struct CatalogClient<T: CatalogEntity> {
    sender: mpsc::Sender<CatalogRequest<T>>,
}

impl<T: CatalogEntity> CatalogClient<T> {
    pub fn new(sender: mpsc::Sender<CatalogRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, CatalogError>>) -> CatalogRequest<T>,
    ) -> Result<R, CatalogError> {
        let (reply, response) = oneshot::channel();
        let permit = acquire_permit(&self.sender).await?;
        permit.send(build(reply));
        response.await.map_err(|_| CatalogError::ActorDropped)?
    }

    /// Admits a new entry and returns its minted id.
    pub async fn create(&self, params: T::Create) -> Result<T::Id, CatalogError> {
        self.request(|reply| CatalogRequest::Create { params, reply })
            .await
    }

    /// Fetches a clone of one entry.
    pub async fn get(&self, id: T::Id) -> Result<Option<T>, CatalogError> {
        self.request(|reply| CatalogRequest::Get { id, reply })
            .await
    }

    /// Fetches a clone of every entry.
    pub async fn list(&self) -> Result<Vec<T>, CatalogError> {
        self.request(|reply| CatalogRequest::List { reply }).await
    }
}
