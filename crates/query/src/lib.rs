//! `keel-query` — pagination DTOs, repository contracts and filter predicates.

pub mod error;
pub mod predicate;
pub mod repository;
pub mod search;

pub use error::{PredicateError, RepositoryError};
pub use predicate::{CANONICAL_PARAM, CompareOp, Expr, Predicate, or};
pub use repository::{CommandRepository, SearchableRepository};
pub use search::{DEFAULT_PAGE, DEFAULT_PER_PAGE, SearchInput, SearchOrder, SearchOutput};
