// ⚠️ Error Taxonomy - One vocabulary for every validation outcome
// Five kinds cover everything the catalog can reject: wrong shape,
// bad value, missing target, missing reference, uniqueness clash.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// ENTITY KINDS
// ============================================================================

/// The four entity families the catalog manages.
///
/// Used in errors so a caller can tell *which* lookup failed without
/// parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Account,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "Account",
            EntityKind::Amenity => "Amenity",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CATALOG ERROR
// ============================================================================

/// Every failure the catalog core can produce.
///
/// The split between `WrongType` and `InvalidValue` is deliberate:
/// `WrongType` means the raw input had the wrong JSON shape (a number
/// where a string belongs), `InvalidValue` means the shape was fine but
/// the value broke a domain rule (latitude 90.5, rating 0). A missing
/// required field counts as a shape problem and reports `WrongType`
/// with `expected: "provided"`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Raw field had the wrong JSON shape for its slot.
    #[error("{field} must be {expected}")]
    WrongType { field: String, expected: &'static str },

    /// Shape was right, domain rule was not.
    #[error("{field} {reason}")]
    InvalidValue { field: String, reason: String },

    /// The entity an operation targets does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// A foreign id inside a payload points at nothing.
    #[error("referenced {kind} not found: {id}")]
    ReferenceNotFound { kind: EntityKind, id: String },

    /// A uniqueness rule would be violated (normalized email, amenity name).
    #[error("{field} already registered: {value}")]
    Conflict { field: String, value: String },
}

impl CatalogError {
    pub fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        CatalogError::WrongType {
            field: field.into(),
            expected,
        }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn reference_not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        CatalogError::ReferenceNotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        CatalogError::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when the error targets a missing entity (maps to HTTP 404;
    /// everything else in the taxonomy is a caller mistake, HTTP 400).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

/// Result alias used across the catalog core.
pub type Result<T> = std::result::Result<T, CatalogError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_type_display() {
        let err = CatalogError::wrong_type("first_name", "a string");
        assert_eq!(err.to_string(), "first_name must be a string");

        let missing = CatalogError::wrong_type("email", "provided");
        assert_eq!(missing.to_string(), "email must be provided");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = CatalogError::invalid_value("latitude", "must be between -90 and 90");
        assert_eq!(err.to_string(), "latitude must be between -90 and 90");

        let err2 = CatalogError::invalid_value("first_name", "max length is 50");
        assert_eq!(err2.to_string(), "first_name max length is 50");
    }

    #[test]
    fn test_not_found_display() {
        let err = CatalogError::not_found(EntityKind::Place, "abc-123");
        assert_eq!(err.to_string(), "Place not found: abc-123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reference_not_found_display() {
        let err = CatalogError::reference_not_found(EntityKind::Account, "owner-9");
        assert_eq!(err.to_string(), "referenced Account not found: owner-9");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_conflict_display() {
        let err = CatalogError::conflict("email", "jane@example.com");
        assert_eq!(err.to_string(), "email already registered: jane@example.com");
    }

    #[test]
    fn test_entity_kind_as_str() {
        assert_eq!(EntityKind::Account.as_str(), "Account");
        assert_eq!(EntityKind::Amenity.as_str(), "Amenity");
        assert_eq!(EntityKind::Place.as_str(), "Place");
        assert_eq!(EntityKind::Review.as_str(), "Review");
    }
}
