//! Event records and their persistence.

pub mod domain;
pub mod store;

pub use domain::{Event, EventId, EventSubmission, NewEvent, ValidationError};
pub use store::{EventStore, InMemoryEventStore, JsonFileEventStore, StoreError};
