//! Application-level error codes used for default API errors.

use keel_core::{ApplicationErrorCode, CatalogEntry, Enumeration};

pub struct GenericErrorCodes;

impl GenericErrorCodes {
    pub const UNEXPECTED: ApplicationErrorCode = ApplicationErrorCode::new(1);
    pub const VALIDATION: ApplicationErrorCode = ApplicationErrorCode::new(2);
    pub const NOT_FOUND: ApplicationErrorCode = ApplicationErrorCode::new(3);
    pub const CONFLICT: ApplicationErrorCode = ApplicationErrorCode::new(4);
    pub const UNAUTHORIZED: ApplicationErrorCode = ApplicationErrorCode::new(5);
    pub const FORBIDDEN: ApplicationErrorCode = ApplicationErrorCode::new(6);
    pub const CANCELLED: ApplicationErrorCode = ApplicationErrorCode::new(7);

    const ENTRIES: &'static [CatalogEntry<ApplicationErrorCode>] = &[
        CatalogEntry::new("Unexpected", Self::UNEXPECTED),
        CatalogEntry::new("Validation", Self::VALIDATION),
        CatalogEntry::new("NotFound", Self::NOT_FOUND),
        CatalogEntry::new("Conflict", Self::CONFLICT),
        CatalogEntry::new("Unauthorized", Self::UNAUTHORIZED),
        CatalogEntry::new("Forbidden", Self::FORBIDDEN),
        CatalogEntry::new("Cancelled", Self::CANCELLED),
    ];
}

impl Enumeration for GenericErrorCodes {
    type Code = ApplicationErrorCode;

    fn entries() -> &'static [CatalogEntry<ApplicationErrorCode>] {
        Self::ENTRIES
    }
}
