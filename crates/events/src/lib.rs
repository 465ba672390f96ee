//! Domain events raised by aggregates and drained by the hosting layer.

pub mod domain_event;
pub mod event;
pub mod metadata;

pub use domain_event::{DomainEvent, EventPayload};
pub use event::Event;
pub use metadata::EventMetadata;
