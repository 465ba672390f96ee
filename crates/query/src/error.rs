use thiserror::Error;

/// Failure reported by a repository implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not found")]
    NotFound,

    #[error("operation cancelled")]
    Cancelled,

    /// Storage-specific failure, surfaced without retry.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Failure while evaluating a [`Predicate`](crate::Predicate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredicateError {
    /// The expression references a parameter other than the predicate's own.
    #[error("unbound parameter `{0}`")]
    UnboundParameter(String),

    #[error("entity could not be serialized: {0}")]
    Serialize(String),

    #[error("cannot compare {0} with {1}")]
    NotComparable(String, String),

    #[error("expected a boolean, found {0}")]
    NotBoolean(String),
}
