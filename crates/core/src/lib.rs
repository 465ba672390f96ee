//! `keel-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, error codes, value objects, notifications, entities,
//! aggregates and the results they validate into.

pub mod aggregate;
pub mod catalog;
pub mod entity;
pub mod error;
pub mod error_code;
pub mod id;
pub mod notification;
pub mod result;
pub mod validations;
pub mod validator;
pub mod value_object;

pub use aggregate::{AggregateCore, AggregateRoot};
pub use catalog::{CatalogEntry, CommonErrorCodes, Enumeration};
pub use entity::{CoreAccess, Entity, EntityCore};
pub use error::{KeelError, KeelResult};
pub use error_code::{ApplicationErrorCode, DomainErrorCode};
pub use id::{EntityId, Id, UserId};
pub use notification::{Notification, Notifications};
pub use result::DomainResult;
pub use validator::{DefaultValidator, EntityValidator, validate_async};
pub use value_object::{BoundedString, Description, Name, Value, ValueObject};

pub use tokio_util::sync::CancellationToken;
