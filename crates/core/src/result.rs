//! Outcome of domain validation.

use serde::Serialize;

use crate::error::{KeelError, KeelResult};
use crate::notification::Notification;

/// Immutable outcome of a domain operation or validation pass.
///
/// A result is a success exactly when it carries no errors. Warnings and
/// information may accompany either outcome. The result owns its buckets:
/// once built, nothing the caller does to the lists it passed in is visible
/// through the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainResult {
    errors: Vec<Notification>,
    warnings: Vec<Notification>,
    information: Vec<Notification>,
}

impl DomainResult {
    pub fn success() -> Self {
        Self::success_with(Vec::new(), Vec::new())
    }

    pub fn success_with(warnings: Vec<Notification>, information: Vec<Notification>) -> Self {
        Self {
            errors: Vec::new(),
            warnings,
            information,
        }
    }

    /// A failed result. `errors` must not be empty.
    pub fn failure(errors: Vec<Notification>) -> KeelResult<Self> {
        Self::failure_with(errors, Vec::new(), Vec::new())
    }

    pub fn failure_with(
        errors: Vec<Notification>,
        warnings: Vec<Notification>,
        information: Vec<Notification>,
    ) -> KeelResult<Self> {
        if errors.is_empty() {
            tracing::warn!("rejected failure result without errors");
            return Err(KeelError::MissingErrors);
        }
        Ok(Self {
            errors,
            warnings,
            information,
        })
    }

    /// Pick success or failure from the error bucket.
    pub(crate) fn from_buckets(
        errors: Vec<Notification>,
        warnings: Vec<Notification>,
        information: Vec<Notification>,
    ) -> Self {
        Self {
            errors,
            warnings,
            information,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn errors(&self) -> &[Notification] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Notification] {
        &self.warnings
    }

    pub fn information(&self) -> &[Notification] {
        &self.information
    }

    pub fn into_parts(self) -> (Vec<Notification>, Vec<Notification>, Vec<Notification>) {
        (self.errors, self.warnings, self.information)
    }
}
