//! Statically registered enumerations of named codes.
//!
//! Each catalog lists its members explicitly in `entries()`; lookups are
//! linear scans over that slice, which is fine for the handful of codes a
//! catalog holds.

use crate::error_code::DomainErrorCode;

/// A named member of an [`Enumeration`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CatalogEntry<C> {
    pub name: &'static str,
    pub code: C,
}

impl<C> CatalogEntry<C> {
    pub const fn new(name: &'static str, code: C) -> Self {
        Self { name, code }
    }
}

/// A closed set of named codes.
pub trait Enumeration {
    type Code: Copy + Eq + Ord + 'static;

    /// Every member, in declaration order.
    fn entries() -> &'static [CatalogEntry<Self::Code>];

    fn codes() -> Vec<Self::Code> {
        Self::entries().iter().map(|e| e.code).collect()
    }

    fn by_code(code: Self::Code) -> Option<&'static CatalogEntry<Self::Code>> {
        Self::entries().iter().find(|e| e.code == code)
    }

    fn by_name(name: &str) -> Option<&'static CatalogEntry<Self::Code>> {
        Self::entries().iter().find(|e| e.name == name)
    }

    fn name_of(code: Self::Code) -> Option<&'static str> {
        Self::by_code(code).map(|e| e.name)
    }
}

/// Domain-level error codes shared by validation rules.
pub struct CommonErrorCodes;

impl CommonErrorCodes {
    pub const VALIDATION: DomainErrorCode = DomainErrorCode::new(1001);
    pub const NOT_FOUND: DomainErrorCode = DomainErrorCode::new(1002);
    pub const CONFLICT: DomainErrorCode = DomainErrorCode::new(1003);
    pub const INVALID_STATE: DomainErrorCode = DomainErrorCode::new(1004);
    pub const UNEXPECTED: DomainErrorCode = DomainErrorCode::new(1999);

    const ENTRIES: &'static [CatalogEntry<DomainErrorCode>] = &[
        CatalogEntry::new("Validation", Self::VALIDATION),
        CatalogEntry::new("NotFound", Self::NOT_FOUND),
        CatalogEntry::new("Conflict", Self::CONFLICT),
        CatalogEntry::new("InvalidState", Self::INVALID_STATE),
        CatalogEntry::new("Unexpected", Self::UNEXPECTED),
    ];
}

impl Enumeration for CommonErrorCodes {
    type Code = DomainErrorCode;

    fn entries() -> &'static [CatalogEntry<DomainErrorCode>] {
        Self::ENTRIES
    }
}
