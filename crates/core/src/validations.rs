//! Stateless validation rules.
//!
//! Every rule returns `None` when the value is acceptable and a
//! [`Notification`] tagged [`CommonErrorCodes::VALIDATION`] otherwise. The
//! field name is the last argument; the [`check!`](crate::check) macro fills
//! it with the source text of the checked expression.

use chrono::{DateTime, Utc};
use url::Url;

use crate::catalog::CommonErrorCodes;
use crate::id::EntityId;
use crate::notification::Notification;

/// Message templates shared by all rules.
pub mod messages {
    pub fn not_null(field: &str) -> String {
        format!("{field} should not be null.")
    }

    pub fn not_empty(field: &str) -> String {
        format!("{field} should not be null, empty or white space.")
    }

    pub fn not_default_date(field: &str) -> String {
        format!("{field} should not be the default date.")
    }

    pub fn between_length(field: &str, min: usize, max: usize) -> String {
        format!("{field} should be between {min} and {max} characters long.")
    }

    pub fn valid_url(field: &str) -> String {
        format!("{field} should be a valid absolute URL.")
    }

    pub fn greater_than(field: &str, other_field: &str) -> String {
        format!("{field} should be greater than {other_field}.")
    }
}

fn failure(field: &str, message: String) -> Option<Notification> {
    Some(Notification::new(field, message, CommonErrorCodes::VALIDATION))
}

/// Fails when the value is absent.
pub fn not_null<T>(value: Option<&T>, field: &str) -> Option<Notification> {
    match value {
        Some(_) => None,
        None => failure(field, messages::not_null(field)),
    }
}

/// Fails when the identifier is the nil sentinel.
pub fn not_nil_id<I: EntityId>(id: &I, field: &str) -> Option<Notification> {
    if id.is_nil() {
        failure(field, messages::not_null(field))
    } else {
        None
    }
}

/// Fails on absent, empty, or whitespace-only text.
pub fn not_null_or_empty_or_white_space(value: Option<&str>, field: &str) -> Option<Notification> {
    match value {
        Some(s) if !s.trim().is_empty() => None,
        _ => failure(field, messages::not_empty(field)),
    }
}

/// Fails when the instant is the default (Unix epoch) value.
pub fn not_default_date_time(value: DateTime<Utc>, field: &str) -> Option<Notification> {
    if value == DateTime::<Utc>::default() {
        failure(field, messages::not_default_date(field))
    } else {
        None
    }
}

/// Like [`not_default_date_time`]; an absent instant passes.
pub fn not_default_optional_date_time(
    value: Option<DateTime<Utc>>,
    field: &str,
) -> Option<Notification> {
    value.and_then(|v| not_default_date_time(v, field))
}

/// Fails when non-empty text has a character count outside `[min, max]`.
///
/// Absent or empty text passes; pair with
/// [`not_null_or_empty_or_white_space`] when the value is required.
pub fn between_length(
    value: Option<&str>,
    min: usize,
    max: usize,
    field: &str,
) -> Option<Notification> {
    let s = value.unwrap_or_default();
    if s.is_empty() {
        return None;
    }
    let len = s.chars().count();
    if len < min || len > max {
        failure(field, messages::between_length(field, min, max))
    } else {
        None
    }
}

/// Fails when non-empty text is not an absolute URL.
pub fn valid_url(value: Option<&str>, field: &str) -> Option<Notification> {
    match value {
        None | Some("") => None,
        Some(s) if Url::parse(s).is_ok() => None,
        Some(_) => failure(field, messages::valid_url(field)),
    }
}

/// Fails unless `value` is strictly later than `other`.
pub fn greater_than_date(
    value: DateTime<Utc>,
    other: DateTime<Utc>,
    field: &str,
    other_field: &str,
) -> Option<Notification> {
    if value > other {
        None
    } else {
        failure(field, messages::greater_than(field, other_field))
    }
}

/// Run a rule from [`validations`](crate::validations), using the source text
/// of the first argument as the field name.
///
/// ```ignore
/// let finding = check!(not_null_or_empty_or_white_space(self.title.as_deref()));
/// // field name: "self.title.as_deref()"
/// ```
#[macro_export]
macro_rules! check {
    ($rule:ident($value:expr $(, $arg:expr)* $(,)?)) => {
        $crate::validations::$rule($value $(, $arg)*, stringify!($value))
    };
}
