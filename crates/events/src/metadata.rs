use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keel_core::UserId;

/// Facts recorded alongside every domain event.
///
/// - `user_id` is the acting user; nil when the system acted on its own.
/// - `payload_id` identifies what the event is about (usually the raising
///   aggregate); nil until the raiser sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventMetadata {
    event_id: Uuid,
    occurred_at: DateTime<Utc>,
    user_id: UserId,
    payload_id: Uuid,
}

impl EventMetadata {
    /// Fresh metadata: new UUIDv7 event id, current UTC time, nil user and payload.
    pub fn new() -> Self {
        Self::at(Uuid::now_v7(), Utc::now())
    }

    /// Metadata with explicit identity and time (replay, tests).
    pub fn at(event_id: Uuid, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            occurred_at,
            user_id: UserId::nil(),
            payload_id: Uuid::nil(),
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_payload_id(mut self, payload_id: impl Into<Uuid>) -> Self {
        self.payload_id = payload_id.into();
        self
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn payload_id(&self) -> Uuid {
        self.payload_id
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}
