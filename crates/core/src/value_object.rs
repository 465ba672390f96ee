//! Value objects: equality by value, not identity.
//!
//! Value objects have **no identity**; two value objects holding the same
//! values are equal. They validate on construction and never change
//! afterwards, so an instance that exists is always valid.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KeelError, KeelResult};

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: value objects are copied, not shared by reference
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects should be debuggable (logging, testing)
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money {
///     amount: i64,
///     currency: String,
/// }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + fmt::Debug {}

/// Trimmed string whose length lies within an inclusive range.
///
/// The named wrappers ([`Name`], [`Description`], [`Value`]) fix the range and
/// label; `BoundedString` is the shared building block for them and for
/// project-specific variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundedString(String);

impl BoundedString {
    /// Build from an optional input; `None` behaves as the empty string.
    ///
    /// The input is trimmed before its length (in characters) is checked
    /// against `[min, max]`.
    pub fn new(input: Option<&str>, min: usize, max: usize, label: &str) -> KeelResult<Self> {
        let trimmed = input.unwrap_or_default().trim();
        let len = trimmed.chars().count();
        if len < min || len > max {
            return Err(KeelError::out_of_range(label, min, max));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl ValueObject for BoundedString {}

impl fmt::Display for BoundedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BoundedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! bounded_string {
    ($(#[$meta:meta])* $t:ident, $label:literal, $min:literal, $max:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $t(BoundedString);

        impl $t {
            pub const MIN_LENGTH: usize = $min;
            pub const MAX_LENGTH: usize = $max;

            pub fn new(input: Option<&str>) -> KeelResult<Self> {
                BoundedString::new(input, $min, $max, $label).map(Self)
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl ValueObject for $t {}

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl TryFrom<String> for $t {
            type Error = KeelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(Some(&value))
            }
        }

        impl TryFrom<&str> for $t {
            type Error = KeelError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(Some(value))
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0.into_string()
            }
        }
    };
}

bounded_string!(
    /// Short display name, 3 to 70 characters.
    Name, "Name", 3, 70
);
bounded_string!(
    /// Free-text description, 3 to 250 characters.
    Description, "Description", 3, 250
);
bounded_string!(
    /// Generic payload text, 1 to 2500 characters.
    Value, "Value", 1, 2500
);
