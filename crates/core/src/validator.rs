//! Asynchronous entity validation.
//!
//! Some rules need IO (uniqueness checks against storage, remote lookups).
//! Those live in an [`EntityValidator`] supplied by the application layer;
//! [`validate_async`] merges its findings into the entity and decides the
//! outcome the same way [`Entity::validate`] does.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::entity::{CoreAccess, Entity};
use crate::error::{KeelError, KeelResult};
use crate::notification::{Notification, Notifications};
use crate::result::DomainResult;

/// Entity-specific creation rules.
///
/// Implementors normally override only [`creation_rules`](Self::creation_rules)
/// and push findings into the shared accumulator.
#[async_trait]
pub trait EntityValidator<E>: Send + Sync
where
    E: Entity + Sync,
{
    async fn validate_creation(
        &self,
        entity: &E,
        cancel: &CancellationToken,
    ) -> KeelResult<Vec<Notification>> {
        if cancel.is_cancelled() {
            return Err(KeelError::Cancelled);
        }
        let mut found = Notifications::new();
        self.creation_rules(entity, &mut found, cancel).await?;
        Ok(found.into_vec())
    }

    /// Extension point; the default adds nothing.
    async fn creation_rules(
        &self,
        _entity: &E,
        _found: &mut Notifications,
        _cancel: &CancellationToken,
    ) -> KeelResult<()> {
        Ok(())
    }
}

/// Validator with no extra rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

#[async_trait]
impl<E> EntityValidator<E> for DefaultValidator where E: Entity + Sync {}

/// Run `validator` against `entity`, then validate the entity itself.
///
/// The entity comes back only when the outcome is a success, so a failed
/// entity can't be used by accident. Cancellation observed before or after
/// the validator runs, and any validator error, are returned as-is.
pub async fn validate_async<E, V>(
    validator: &V,
    mut entity: E,
    cancel: &CancellationToken,
) -> KeelResult<(DomainResult, Option<E>)>
where
    E: Entity + Sync,
    V: EntityValidator<E> + ?Sized,
{
    if cancel.is_cancelled() {
        tracing::debug!(entity_id = %entity.id(), "validation cancelled before start");
        return Err(KeelError::Cancelled);
    }

    let found = validator.validate_creation(&entity, cancel).await?;
    if cancel.is_cancelled() {
        tracing::debug!(entity_id = %entity.id(), "validation cancelled in flight");
        return Err(KeelError::Cancelled);
    }

    tracing::trace!(entity_id = %entity.id(), findings = found.len(), "validator finished");
    entity.core_mut(CoreAccess::grant()).add_notifications(found);

    let result = entity.validate();
    if result.is_success() {
        Ok((result, Some(entity)))
    } else {
        Ok((result, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CommonErrorCodes;
    use crate::entity::EntityCore;
    use crate::id::Id;
    use crate::value_object::Name;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct Product {
        core: EntityCore<Id<Product>>,
        name: Name,
    }

    impl Product {
        fn new(name: &str) -> Self {
            Self {
                core: EntityCore::new(),
                name: Name::new(Some(name)).unwrap(),
            }
        }
    }

    impl Entity for Product {
        type Id = Id<Product>;

        fn core(&self) -> &EntityCore<Self::Id> {
            &self.core
        }

        fn core_mut(&mut self, _: CoreAccess) -> &mut EntityCore<Self::Id> {
            &mut self.core
        }
    }

    struct UniqueName {
        taken: HashSet<String>,
    }

    #[async_trait]
    impl EntityValidator<Product> for UniqueName {
        async fn creation_rules(
            &self,
            entity: &Product,
            found: &mut Notifications,
            _cancel: &CancellationToken,
        ) -> KeelResult<()> {
            let finding = self.taken.contains(entity.name.as_str()).then(|| {
                Notification::new("Name", "Name is already taken.", CommonErrorCodes::CONFLICT)
            });
            found.push(finding);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl EntityValidator<Product> for Failing {
        async fn validate_creation(
            &self,
            _entity: &Product,
            _cancel: &CancellationToken,
        ) -> KeelResult<Vec<Notification>> {
            Err(KeelError::collaborator("store unavailable"))
        }
    }

    struct CancelsMidFlight;

    #[async_trait]
    impl EntityValidator<Product> for CancelsMidFlight {
        async fn creation_rules(
            &self,
            _entity: &Product,
            _found: &mut Notifications,
            cancel: &CancellationToken,
        ) -> KeelResult<()> {
            cancel.cancel();
            Ok(())
        }
    }

    fn taken(names: &[&str]) -> UniqueName {
        UniqueName {
            taken: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn default_validator_adds_nothing() {
        let product = Product::new("Lamp");
        let found = DefaultValidator
            .validate_creation(&product, &CancellationToken::new())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn success_returns_the_entity() {
        let product = Product::new("Lamp");
        let id = *product.id();
        let (result, entity) = validate_async(&taken(&["Desk"]), product, &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_success());
        assert_eq!(entity.map(|p| *p.id()), Some(id));
    }

    #[tokio::test]
    async fn failure_withholds_the_entity() {
        let (result, entity) = validate_async(
            &taken(&["Lamp"]),
            Product::new("Lamp"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(result.is_failure());
        assert_eq!(result.errors()[0].error(), CommonErrorCodes::CONFLICT);
        assert!(entity.is_none());
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let validator: Box<dyn EntityValidator<Product>> = Box::new(DefaultValidator);
        let (result, entity) =
            validate_async(validator.as_ref(), Product::new("Lamp"), &CancellationToken::new())
                .await
                .unwrap();
        assert!(result.is_success());
        assert!(entity.is_some());
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = validate_async(&DefaultValidator, Product::new("Lamp"), &cancel)
            .await
            .unwrap_err();
        assert_eq!(err, KeelError::Cancelled);
    }

    #[tokio::test]
    async fn cancellation_during_validation_propagates() {
        let err = validate_async(&CancelsMidFlight, Product::new("Lamp"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, KeelError::Cancelled);
    }

    #[tokio::test]
    async fn collaborator_errors_surface_unchanged() {
        let err = validate_async(&Failing, Product::new("Lamp"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, KeelError::collaborator("store unavailable"));
    }
}
