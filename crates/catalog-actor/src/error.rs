//! # Framework Errors
//!
//! Errors raised by the catalog machinery itself, as opposed to errors an
//! entity raises from its own hooks. Entity errors cross the generic
//! boundary boxed inside [`CatalogError::Entity`]; domain clients downcast
//! them back to their concrete type.

/// Errors that can occur while talking to a catalog actor.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The actor's mailbox is closed; the task has exited.
    #[error("catalog actor is no longer running")]
    ActorClosed,
    /// The actor dropped the reply channel without answering.
    #[error("catalog actor dropped the reply channel")]
    ActorDropped,
    /// The mailbox stayed full through every bounded send attempt. Transient;
    /// the caller may retry with its own backoff.
    #[error("catalog mailbox stayed full after {0} attempts")]
    Overloaded(u32),
    /// No entry with the requested id.
    #[error("no such entry: {0}")]
    NotFound(String),
    /// An entity hook rejected the operation; the boxed error is the
    /// entity's own error type.
    #[error("entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}
