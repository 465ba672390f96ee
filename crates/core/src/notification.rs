//! Validation findings.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error_code::DomainErrorCode;

/// A single validation finding: which field, what went wrong, and its code.
///
/// An empty `field_name` marks a finding about the whole entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Notification {
    field_name: String,
    message: String,
    error: DomainErrorCode,
}

impl Notification {
    pub fn new(
        field_name: impl Into<String>,
        message: impl Into<String>,
        error: DomainErrorCode,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
            error,
        }
    }

    /// A finding not tied to a particular field.
    pub fn general(message: impl Into<String>, error: DomainErrorCode) -> Self {
        Self::new(String::new(), message, error)
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> DomainErrorCode {
        self.error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field: {} - Error: {}: Message - {}",
            self.field_name, self.error, self.message
        )
    }
}

/// Accumulator that drops absent findings.
///
/// Validation rules return `Option<Notification>`; pushing their output here
/// keeps only the failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications(Vec<Notification>);

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: impl Into<Option<Notification>>) -> &mut Self {
        if let Some(n) = finding.into() {
            self.0.push(n);
        }
        self
    }

    pub fn extend<I>(&mut self, findings: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Notification>>,
    {
        for finding in findings {
            self.push(finding);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.0
    }
}

impl From<Notifications> for Vec<Notification> {
    fn from(value: Notifications) -> Self {
        value.0
    }
}
