//! Typed integer error codes.
//!
//! `DomainErrorCode` and `ApplicationErrorCode` carry the same shape but are
//! distinct nominal types, so a domain code cannot leak into a response
//! without an explicit conversion.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KeelError;

/// Error code raised by domain validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainErrorCode(i32);

/// Error code exposed at the application/response boundary.
///
/// (De)serialized by hand: see the `Serialize`/`Deserialize` impls below.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplicationErrorCode(i32);

macro_rules! impl_error_code {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            pub const fn value(self) -> i32 {
                self.0
            }

            /// Total order where a missing code sorts before every code.
            pub fn compare_to(&self, other: Option<&Self>) -> Ordering {
                match other {
                    Some(other) => self.cmp(other),
                    None => Ordering::Greater,
                }
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i32> for $t {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $t {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$t> for i32 {
            fn eq(&self, other: &$t) -> bool {
                *self == other.0
            }
        }

        impl FromStr for $t {
            type Err = KeelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|e| KeelError::invalid_error_code(format!("{}: {}", $name, e)))
            }
        }
    };
}

impl_error_code!(DomainErrorCode, "DomainErrorCode");
impl_error_code!(ApplicationErrorCode, "ApplicationErrorCode");

impl From<DomainErrorCode> for ApplicationErrorCode {
    fn from(value: DomainErrorCode) -> Self {
        Self(value.0)
    }
}

impl Serialize for ApplicationErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for ApplicationErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ApplicationErrorCodeVisitor)
    }
}

/// Accepts a bare number, or the legacy `{"value": <int>}` object.
struct ApplicationErrorCodeVisitor;

impl<'de> Visitor<'de> for ApplicationErrorCodeVisitor {
    type Value = ApplicationErrorCode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer error code or an object with an integer `value`")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        i32::try_from(v)
            .map(ApplicationErrorCode)
            .map_err(|_| E::custom(format!("error code {v} out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i32::try_from(v)
            .map(ApplicationErrorCode)
            .map_err(|_| E::custom(format!("error code {v} out of range")))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut value: Option<i32> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "value" {
                if value.is_some() {
                    return Err(de::Error::duplicate_field("value"));
                }
                value = Some(map.next_value()?);
            } else {
                map.next_value::<de::IgnoredAny>()?;
            }
        }
        value
            .map(ApplicationErrorCode)
            .ok_or_else(|| de::Error::missing_field("value"))
    }
}
