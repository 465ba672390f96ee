//! Entity: identity + continuity across state changes.
//!
//! Entities embed an [`EntityCore`], which owns the identifier and the three
//! notification buckets, and expose it through the [`Entity`] trait. The
//! buckets are filled by the entity's own operations (or its validator) and
//! collapsed into a [`DomainResult`] by [`Entity::validate`].

use crate::id::EntityId;
use crate::notification::Notification;
use crate::result::DomainResult;
use crate::validations;

/// Identifier plus accumulated findings of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCore<I> {
    id: I,
    notifications: Vec<Notification>,
    warnings: Vec<Notification>,
    information: Vec<Notification>,
}

impl<I: EntityId> EntityCore<I> {
    /// Core with a freshly generated identifier.
    pub fn new() -> Self {
        Self::with_id(I::new())
    }

    /// Core for an entity reconstituted with a known identifier.
    pub fn with_id(id: I) -> Self {
        Self {
            id,
            notifications: Vec::new(),
            warnings: Vec::new(),
            information: Vec::new(),
        }
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn warnings(&self) -> &[Notification] {
        &self.warnings
    }

    pub fn information(&self) -> &[Notification] {
        &self.information
    }

    /// Record an error finding; `None` is ignored so rule output can be
    /// passed straight through.
    pub fn add_notification(&mut self, finding: impl Into<Option<Notification>>) {
        self.notifications.extend(finding.into());
    }

    pub fn add_notifications<T>(&mut self, findings: impl IntoIterator<Item = T>)
    where
        T: Into<Option<Notification>>,
    {
        self.notifications
            .extend(findings.into_iter().filter_map(Into::into));
    }

    pub fn add_warning(&mut self, finding: impl Into<Option<Notification>>) {
        self.warnings.extend(finding.into());
    }

    pub fn add_information(&mut self, finding: impl Into<Option<Notification>>) {
        self.information.extend(finding.into());
    }

    /// Check the identifier, then report everything accumulated so far.
    ///
    /// Findings stay on the entity; validating twice reports them twice.
    pub fn validate(&mut self) -> DomainResult {
        self.add_notification(validations::not_nil_id(&self.id, "Id"));

        let result = DomainResult::from_buckets(
            self.notifications.clone(),
            self.warnings.clone(),
            self.information.clone(),
        );
        tracing::debug!(
            entity_id = %self.id,
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "entity validated"
        );
        result
    }
}

impl<I: EntityId> Default for EntityCore<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Permission to write an entity's buckets through [`Entity::core_mut`].
///
/// Only this crate can create one, so callers outside it can read the
/// buckets through the trait but not append to them. An entity writes its
/// own buckets through the `EntityCore` it embeds.
///
/// ```compile_fail
/// let access = keel_core::entity::CoreAccess(());
/// ```
#[derive(Debug)]
pub struct CoreAccess(());

impl CoreAccess {
    pub(crate) fn grant() -> Self {
        CoreAccess(())
    }
}

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: EntityId;

    fn core(&self) -> &EntityCore<Self::Id>;

    fn core_mut(&mut self, access: CoreAccess) -> &mut EntityCore<Self::Id>;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id {
        self.core().id()
    }

    fn notifications(&self) -> &[Notification] {
        self.core().notifications()
    }

    fn warnings(&self) -> &[Notification] {
        self.core().warnings()
    }

    fn information(&self) -> &[Notification] {
        self.core().information()
    }

    fn validate(&mut self) -> DomainResult {
        self.core_mut(CoreAccess::grant()).validate()
    }
}
