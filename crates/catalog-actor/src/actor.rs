//! # Catalog Actor Runtime
//!
//! [`CatalogActor`] is the server half of a catalog: it owns the entries and
//! the receiving end of the mailbox, and processes requests strictly one at
//! a time. Exclusive ownership inside one task is the whole concurrency
//! story; there is no lock to take and no lock to forget.
//!
//! A process typically runs one catalog actor per entity type. The actors
//! run in parallel with each other, while requests against any single
//! catalog are serialized by its mailbox.

use crate::client::CatalogClient;
use crate::entity::CatalogEntity;
use crate::error::CatalogError;
use crate::message::CatalogRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Actor owning a collection of [`CatalogEntity`] entries.
///
/// Ids are minted from an internal `u32` counter, converted through
/// `T::Id: From<u32>`. The counter only advances when a creation succeeds,
/// so rejected payloads do not burn ids.
pub struct CatalogActor<T: CatalogEntity> {
    receiver: mpsc::Receiver<CatalogRequest<T>>,
    entries: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: CatalogEntity> CatalogActor<T> {
    /// Creates the actor and its client.
    ///
    /// `mailbox` bounds the number of queued requests. Senders that find the
    /// mailbox full back off and eventually fail with
    /// [`CatalogError::Overloaded`] rather than waiting forever.
    pub fn new(mailbox: usize) -> (Self, CatalogClient<T>) {
        let (sender, receiver) = mpsc::channel(mailbox);
        let actor = Self {
            receiver,
            entries: HashMap::new(),
            next_id: 1,
        };
        (actor, CatalogClient::new(sender))
    }

    /// Runs the message loop until every client handle is dropped.
    ///
    /// `context` is handed to [`CatalogEntity::on_create`] for each admitted
    /// entry; it is how entities reach collaborating actors that did not
    /// exist when this actor was constructed.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("unknown");
        info!(entity_type, "catalog started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::Create { params, reply } => {
                    debug!(entity_type, ?params, "create");
                    if let Err(e) = T::validate_create(&params, &mut self.entries.values()) {
                        warn!(entity_type, error = %e, "create rejected by catalog rule");
                        let _ = reply.send(Err(CatalogError::Entity(Box::new(e))));
                        continue;
                    }
                    let id = T::Id::from(self.next_id);
                    match T::from_create_params(id.clone(), params) {
                        Ok(mut entry) => {
                            if let Err(e) = entry.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ = reply.send(Err(CatalogError::Entity(Box::new(e))));
                                continue;
                            }
                            self.next_id += 1;
                            self.entries.insert(id.clone(), entry);
                            info!(entity_type, %id, total = self.entries.len(), "created");
                            let _ = reply.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "create rejected by entity");
                            let _ = reply.send(Err(CatalogError::Entity(Box::new(e))));
                        }
                    }
                }
                CatalogRequest::Get { id, reply } => {
                    let entry = self.entries.get(&id).cloned();
                    debug!(entity_type, %id, found = entry.is_some(), "get");
                    let _ = reply.send(Ok(entry));
                }
                CatalogRequest::List { reply } => {
                    let all: Vec<T> = self.entries.values().cloned().collect();
                    debug!(entity_type, total = all.len(), "list");
                    let _ = reply.send(Ok(all));
                }
            }
        }

        info!(entity_type, total = self.entries.len(), "catalog shut down");
    }
}
