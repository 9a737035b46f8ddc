//! Pure domain data: users, events, and the registrations binding them.
//!
//! Types here carry no behavior beyond construction and validation; the
//! actors in the rest of the crate own all mutable state.

pub mod event;
pub mod registration;
pub mod user;

pub use event::{Event, EventCreate, EventId, CAPACITY_MAX, CAPACITY_MIN};
pub use registration::Registration;
pub use user::{User, UserCreate, UserId};
