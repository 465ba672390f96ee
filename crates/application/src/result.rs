//! Mutable outcome + payload for the application boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use keel_core::{DomainResult, Notification};

use crate::error_model::ErrorModel;

/// Outcome of an application operation, optionally carrying a payload.
///
/// Unlike [`DomainResult`] this type is built up incrementally: handlers add
/// errors, warnings and data as they go. Success is computed from the error
/// bucket on every call, so adding an error turns an existing success into a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationResult<T> {
    data: Option<T>,
    errors: Vec<ErrorModel>,
    warnings: Vec<ErrorModel>,
    information: Vec<ErrorModel>,
}

impl<T> ApplicationResult<T> {
    pub fn success(data: Option<T>) -> Self {
        Self::success_with(data, Vec::new(), Vec::new())
    }

    pub fn success_with(
        data: Option<T>,
        warnings: Vec<ErrorModel>,
        information: Vec<ErrorModel>,
    ) -> Self {
        Self {
            data,
            errors: Vec::new(),
            warnings,
            information,
        }
    }

    pub fn failure(errors: Vec<ErrorModel>) -> Self {
        Self::failure_with(errors, Vec::new(), Vec::new())
    }

    pub fn failure_with(
        errors: Vec<ErrorModel>,
        warnings: Vec<ErrorModel>,
        information: Vec<ErrorModel>,
    ) -> Self {
        Self {
            data: None,
            errors,
            warnings,
            information,
        }
    }

    /// Translate a domain outcome; `data` is kept only if it succeeded.
    pub fn from_domain(result: DomainResult, data: Option<T>) -> Self {
        let success = result.is_success();
        let (errors, warnings, information) = result.into_parts();
        let convert = |v: Vec<Notification>| v.into_iter().map(ErrorModel::from).collect::<Vec<_>>();
        if !success {
            tracing::debug!(errors = errors.len(), "domain failure mapped to application result");
        }
        Self {
            data: if success { data } else { None },
            errors: convert(errors),
            warnings: convert(warnings),
            information: convert(information),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn errors(&self) -> &[ErrorModel] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ErrorModel] {
        &self.warnings
    }

    pub fn information(&self) -> &[ErrorModel] {
        &self.information
    }

    pub fn add_error(&mut self, error: ErrorModel) -> &mut Self {
        self.errors.push(error);
        self
    }

    pub fn add_errors(&mut self, errors: impl IntoIterator<Item = ErrorModel>) -> &mut Self {
        self.errors.extend(errors);
        self
    }

    pub fn add_warnings(&mut self, warnings: impl IntoIterator<Item = ErrorModel>) -> &mut Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn add_information(
        &mut self,
        information: impl IntoIterator<Item = ErrorModel>,
    ) -> &mut Self {
        self.information.extend(information);
        self
    }

    pub fn set_data(&mut self, data: T) -> &mut Self {
        self.data = Some(data);
        self
    }
}

impl<T> Default for ApplicationResult<T> {
    fn default() -> Self {
        Self::success(None)
    }
}

impl<T> From<T> for ApplicationResult<T> {
    fn from(data: T) -> Self {
        Self::success(Some(data))
    }
}

#[derive(Serialize)]
struct WireRef<'a, T> {
    data: Option<&'a T>,
    errors: &'a [ErrorModel],
    warnings: &'a [ErrorModel],
    information: &'a [ErrorModel],
    is_success: bool,
}

#[derive(Deserialize)]
struct WireOwned<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ErrorModel>,
    #[serde(default)]
    warnings: Vec<ErrorModel>,
    #[serde(default)]
    information: Vec<ErrorModel>,
}

impl<T: Serialize> Serialize for ApplicationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireRef {
            data: self.data.as_ref(),
            errors: &self.errors,
            warnings: &self.warnings,
            information: &self.information,
            is_success: self.is_success(),
        }
        .serialize(serializer)
    }
}

/// `is_success` in the input is ignored; it is always derived from `errors`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApplicationResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireOwned::<T>::deserialize(deserializer)?;
        Ok(Self {
            data: wire.data,
            errors: wire.errors,
            warnings: wire.warnings,
            information: wire.information,
        })
    }
}
