//! Aggregate roots: entities that own a domain-event outbox.

use core::fmt;

use crate::entity::{CoreAccess, Entity, EntityCore};
use crate::id::EntityId;

/// Entity state plus the events raised since the last drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateCore<I, E> {
    entity: EntityCore<I>,
    events: Vec<E>,
}

impl<I: EntityId, E: Clone + PartialEq> AggregateCore<I, E> {
    pub fn new() -> Self {
        Self::with_id(I::new())
    }

    pub fn with_id(id: I) -> Self {
        Self {
            entity: EntityCore::with_id(id),
            events: Vec::new(),
        }
    }

    pub fn entity(&self) -> &EntityCore<I> {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut EntityCore<I> {
        &mut self.entity
    }

    /// Record an event unless an equal one is already pending.
    ///
    /// Returns `false` when the event was a duplicate.
    pub fn raise_domain_event(&mut self, event: E) -> bool {
        if self.events.contains(&event) {
            tracing::trace!(aggregate_id = %self.entity.id(), "duplicate domain event ignored");
            return false;
        }
        self.events.push(event);
        true
    }

    /// Pending events in raise order.
    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Drain pending events, leaving the outbox empty.
    pub fn take_events(&mut self) -> Vec<E> {
        core::mem::take(&mut self.events)
    }
}

impl<I: EntityId, E: Clone + PartialEq> Default for AggregateCore<I, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate root marker + minimal interface.
///
/// Implementors embed an [`AggregateCore`] and point [`Entity::core`] at
/// `AggregateCore::entity`.
pub trait AggregateRoot: Entity {
    type Event: Clone + PartialEq + fmt::Debug;

    fn aggregate(&self) -> &AggregateCore<Self::Id, Self::Event>;

    fn aggregate_mut(&mut self, access: CoreAccess) -> &mut AggregateCore<Self::Id, Self::Event>;

    fn raise_domain_event(&mut self, event: Self::Event) -> bool {
        self.aggregate_mut(CoreAccess::grant()).raise_domain_event(event)
    }

    fn events(&self) -> &[Self::Event] {
        self.aggregate().events()
    }

    fn clear_events(&mut self) {
        self.aggregate_mut(CoreAccess::grant()).clear_events();
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        self.aggregate_mut(CoreAccess::grant()).take_events()
    }
}
