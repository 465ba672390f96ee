//! Storage contracts for the write (command) and read (query) sides.
//!
//! Only the contracts live here; implementations belong to infrastructure
//! crates. Every method takes a cancellation token and must return
//! [`RepositoryError::Cancelled`](crate::RepositoryError::Cancelled) when it
//! observes cancellation.

use async_trait::async_trait;

use keel_core::{CancellationToken, Entity};

use crate::error::RepositoryError;
use crate::search::{SearchInput, SearchOutput};

/// Write-side repository.
#[async_trait]
pub trait CommandRepository<E>: Send + Sync
where
    E: Entity + Send + Sync + 'static,
{
    /// Persist a new or changed entity.
    async fn save(&self, entity: &E, cancel: &CancellationToken) -> Result<(), RepositoryError>;

    async fn get_by_id(
        &self,
        id: &E::Id,
        cancel: &CancellationToken,
    ) -> Result<Option<E>, RepositoryError>;
}

/// Read-side repository with paginated search.
///
/// `S` lets a store accept a richer request than [`SearchInput`]
/// (extra filters, say) while keeping the paging contract.
#[async_trait]
pub trait SearchableRepository<E, S = SearchInput>: Send + Sync
where
    E: Entity + Send + Sync + 'static,
    S: Send + 'static,
{
    async fn get_by_id(
        &self,
        id: &E::Id,
        cancel: &CancellationToken,
    ) -> Result<Option<E>, RepositoryError>;

    async fn search(
        &self,
        input: S,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<E>, RepositoryError>;
}
