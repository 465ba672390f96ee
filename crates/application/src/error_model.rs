use core::fmt;

use serde::{Deserialize, Serialize};

use keel_core::{ApplicationErrorCode, Notification};

/// A finding as exposed to API consumers.
///
/// Mirrors [`Notification`] with an application-layer code. The optional
/// inner message carries lower-level detail (e.g. a collaborator's error
/// text) without altering the primary message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorModel {
    field_name: String,
    message: String,
    error: ApplicationErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inner_message: Option<String>,
}

impl ErrorModel {
    pub fn new(
        field_name: impl Into<String>,
        message: impl Into<String>,
        error: ApplicationErrorCode,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
            error,
            inner_message: None,
        }
    }

    pub fn general(message: impl Into<String>, error: ApplicationErrorCode) -> Self {
        Self::new(String::new(), message, error)
    }

    /// Same finding with `inner` attached as detail.
    pub fn with_inner_message(mut self, inner: impl Into<String>) -> Self {
        self.inner_message = Some(inner.into());
        self
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> ApplicationErrorCode {
        self.error
    }

    pub fn inner_message(&self) -> Option<&str> {
        self.inner_message.as_deref()
    }
}

impl From<Notification> for ErrorModel {
    fn from(value: Notification) -> Self {
        Self::new(value.field_name(), value.message(), value.error().into())
    }
}

impl From<&Notification> for ErrorModel {
    fn from(value: &Notification) -> Self {
        Self::new(value.field_name(), value.message(), value.error().into())
    }
}

impl fmt::Display for ErrorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field: {} - Error: {}: Message - {}",
            self.field_name, self.error, self.message
        )?;
        if let Some(inner) = &self.inner_message {
            write!(f, " ({inner})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::CommonErrorCodes;

    #[test]
    fn converts_from_notification_keeping_the_code_value() {
        let n = Notification::new("Name", "Name is taken.", CommonErrorCodes::CONFLICT);
        let model = ErrorModel::from(&n);
        assert_eq!(model.field_name(), "Name");
        assert_eq!(model.message(), "Name is taken.");
        assert_eq!(model.error(), 1003);
        assert_eq!(model.inner_message(), None);
    }

    #[test]
    fn inner_message_only_amends_detail() {
        let model = ErrorModel::general("Storage failed.", ApplicationErrorCode::new(1))
            .with_inner_message("connection reset");
        assert_eq!(model.message(), "Storage failed.");
        assert_eq!(model.inner_message(), Some("connection reset"));
        assert_eq!(
            model.to_string(),
            "Field:  - Error: 1: Message - Storage failed. (connection reset)"
        );
    }

    #[test]
    fn json_shape() {
        let model = ErrorModel::new("Id", "Id should not be null.", ApplicationErrorCode::new(2));
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(
            json,
            r#"{"field_name":"Id","message":"Id should not be null.","error":2}"#
        );

        let legacy: ErrorModel = serde_json::from_str(
            r#"{"field_name":"Id","message":"Id should not be null.","error":{"value":2}}"#,
        )
        .unwrap();
        assert_eq!(legacy, model);
    }
}
