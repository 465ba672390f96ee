use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keel_core::UserId;

use crate::event::Event;
use crate::metadata::EventMetadata;

/// Body of a domain event.
pub trait EventPayload: Clone + core::fmt::Debug + PartialEq + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;
}

/// Immutable record of something that happened to an aggregate.
///
/// Equality is structural over metadata and payload, so a clone of an event
/// equals the original while two separately raised events never do (their
/// ids differ).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent<P> {
    #[serde(flatten)]
    metadata: EventMetadata,
    payload: P,
}

impl<P> DomainEvent<P> {
    pub fn new(payload: P) -> Self {
        Self::with_metadata(EventMetadata::new(), payload)
    }

    pub fn with_metadata(metadata: EventMetadata, payload: P) -> Self {
        Self { metadata, payload }
    }

    /// Attribute the event to an acting user.
    pub fn raised_by(mut self, user_id: UserId) -> Self {
        self.metadata = self.metadata.with_user(user_id);
        self
    }

    /// Point the event at the entity it concerns.
    pub fn about(mut self, payload_id: impl Into<Uuid>) -> Self {
        self.metadata = self.metadata.with_payload_id(payload_id);
        self
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    pub fn user_id(&self) -> UserId {
        self.metadata.user_id()
    }

    pub fn payload_id(&self) -> Uuid {
        self.metadata.payload_id()
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P: EventPayload> Event for DomainEvent<P> {
    fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    fn event_id(&self) -> Uuid {
        self.metadata.event_id()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.metadata.occurred_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use keel_core::{
        AggregateCore, AggregateRoot, CoreAccess, Entity, EntityCore, EntityId, Id, Name,
    };

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    enum ProductEvent {
        Renamed { name: String },
        Discontinued,
    }

    impl EventPayload for ProductEvent {
        fn event_type(&self) -> &'static str {
            match self {
                ProductEvent::Renamed { .. } => "catalog.product.renamed",
                ProductEvent::Discontinued => "catalog.product.discontinued",
            }
        }
    }

    #[derive(Debug)]
    struct Product {
        state: AggregateCore<Id<Product>, DomainEvent<ProductEvent>>,
        name: Name,
    }

    impl Product {
        fn new(name: Name) -> Self {
            Self {
                state: AggregateCore::new(),
                name,
            }
        }

        fn rename(&mut self, name: Name, by: UserId) {
            self.name = name;
            let event = DomainEvent::new(ProductEvent::Renamed {
                name: self.name.to_string(),
            })
            .raised_by(by)
            .about(*self.id().as_uuid());
            self.raise_domain_event(event);
        }
    }

    impl Entity for Product {
        type Id = Id<Product>;

        fn core(&self) -> &EntityCore<Self::Id> {
            self.state.entity()
        }

        fn core_mut(&mut self, _: CoreAccess) -> &mut EntityCore<Self::Id> {
            self.state.entity_mut()
        }
    }

    impl AggregateRoot for Product {
        type Event = DomainEvent<ProductEvent>;

        fn aggregate(&self) -> &AggregateCore<Self::Id, Self::Event> {
            &self.state
        }

        fn aggregate_mut(&mut self, _: CoreAccess) -> &mut AggregateCore<Self::Id, Self::Event> {
            &mut self.state
        }
    }

    fn name(s: &str) -> Name {
        Name::new(Some(s)).unwrap()
    }

    #[test]
    fn defaults_to_nil_user_and_payload() {
        let event = DomainEvent::new(ProductEvent::Discontinued);
        assert!(event.user_id().is_nil());
        assert!(event.payload_id().is_nil());
        assert!(!event.event_id().is_nil());
        assert_eq!(event.event_type(), "catalog.product.discontinued");
    }

    #[test]
    fn aggregate_records_attributed_events() {
        let user = <UserId as EntityId>::new();
        let mut product = Product::new(name("Lamp"));
        product.rename(name("Desk lamp"), user);

        let events = product.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_id(), user);
        assert_eq!(events[0].payload_id(), *product.id().as_uuid());
        assert_eq!(
            events[0].payload(),
            &ProductEvent::Renamed {
                name: "Desk lamp".to_string()
            }
        );
    }

    #[test]
    fn same_event_raised_twice_is_kept_once() {
        let mut product = Product::new(name("Lamp"));
        let event = DomainEvent::new(ProductEvent::Discontinued);
        product.raise_domain_event(event.clone());
        product.raise_domain_event(event);
        assert_eq!(product.events().len(), 1);
    }

    #[test]
    fn equal_payloads_with_distinct_ids_are_both_kept() {
        let mut product = Product::new(name("Lamp"));
        product.raise_domain_event(DomainEvent::new(ProductEvent::Discontinued));
        product.raise_domain_event(DomainEvent::new(ProductEvent::Discontinued));
        assert_eq!(product.events().len(), 2);
        assert!(product.events()[0].occurred_at() <= product.events()[1].occurred_at());
    }

    #[test]
    fn serializes_metadata_inline() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let metadata = EventMetadata::at(Uuid::nil(), at);
        let event = DomainEvent::with_metadata(metadata, ProductEvent::Discontinued);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_id"], Uuid::nil().to_string());
        assert_eq!(json["payload"], "Discontinued");

        let back: DomainEvent<ProductEvent> = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
