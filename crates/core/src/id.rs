//! Strongly-typed identifiers used across the domain.
//!
//! Every entity gets its own identifier type by instantiating [`Id`] with a
//! kind tag (usually the entity type itself). Two ids over different kinds
//! never compare or convert into each other.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::KeelError;

/// Factory + accessor contract shared by every identifier type.
pub trait EntityId: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync {
    /// Create a fresh, never-before-seen identifier.
    fn new() -> Self;

    /// Reconstitute an identifier from a known raw value.
    fn load(raw: Uuid) -> Self;

    fn as_uuid(&self) -> &Uuid;

    /// `true` for the all-zero sentinel.
    fn is_nil(&self) -> bool {
        self.as_uuid().is_nil()
    }
}

/// Identifier of an entity of kind `K`.
pub struct Id<K> {
    raw: Uuid,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Id<K> {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer `load` in tests for determinism.
    pub fn new() -> Self {
        Self::load(Uuid::now_v7())
    }

    pub fn load(raw: Uuid) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// The empty sentinel, mainly for rehydration and tests.
    pub fn nil() -> Self {
        Self::load(Uuid::nil())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.raw
    }

    pub fn is_nil(&self) -> bool {
        self.raw.is_nil()
    }
}

// Manual impls: derives would put bounds on `K`.

impl<K> Default for Id<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Id<K> {}

impl<K> PartialOrd for Id<K> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Id<K> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.raw).finish()
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

impl<K> FromStr for Id<K> {
    type Err = KeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = Uuid::from_str(s).map_err(|e| KeelError::invalid_id(e.to_string()))?;
        Ok(Self::load(raw))
    }
}

impl<K> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, K> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::load)
    }
}

impl<K> EntityId for Id<K> {
    fn new() -> Self {
        Id::new()
    }

    fn load(raw: Uuid) -> Self {
        Id::load(raw)
    }

    fn as_uuid(&self) -> &Uuid {
        &self.raw
    }
}

/// Identifier of a user (actor identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// The empty sentinel ("no user").
            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = KeelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| KeelError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }

        impl EntityId for $t {
            fn new() -> Self {
                Self(Uuid::now_v7())
            }

            fn load(raw: Uuid) -> Self {
                Self(raw)
            }

            fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

impl_uuid_newtype!(UserId, "UserId");
