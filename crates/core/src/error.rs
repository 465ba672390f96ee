//! Error model for programming and boundary failures.
//!
//! Business-rule violations never show up here: they are reported as
//! [`Notification`](crate::Notification)s inside a
//! [`DomainResult`](crate::DomainResult). `KeelError` covers the other half of
//! the taxonomy: invalid construction arguments, malformed wire input and
//! cancellation.

use thiserror::Error;

/// Result type used for fallible construction and async entry points.
pub type KeelResult<T> = Result<T, KeelError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeelError {
    /// A bounded value was constructed outside its inclusive range.
    #[error("{label} must be between {min} and {max} characters.")]
    OutOfRange {
        label: String,
        min: usize,
        max: usize,
    },

    /// A failure result was requested without any error notification.
    #[error("a failure result requires at least one error notification")]
    MissingErrors,

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An error code had an unsupported textual or JSON shape.
    #[error("invalid error code: {0}")]
    InvalidErrorCode(String),

    /// The operation observed a cancellation request.
    #[error("operation cancelled")]
    Cancelled,

    /// An injected collaborator failed; the message is surfaced unchanged.
    #[error("collaborator failed: {0}")]
    Collaborator(String),
}

impl KeelError {
    pub fn out_of_range(label: impl Into<String>, min: usize, max: usize) -> Self {
        Self::OutOfRange {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_error_code(msg: impl Into<String>) -> Self {
        Self::InvalidErrorCode(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }
}
