// Entity Models - Validated catalog records
// Each entity owns its field rules:
// - Stable identity (UUID) that NEVER changes
// - created_at / updated_at timestamps, advanced only on accepted mutations
// - A fixed allow-list of updatable fields, applied all-or-nothing

pub mod account;
pub mod amenity;
pub mod place;
pub mod review;

pub use account::Account;
pub use amenity::Amenity;
pub use place::Place;
pub use review::Review;

use crate::error::{CatalogError, Result};
use serde_json::Value;

/// Partial payload passed to constructors and `update`: raw field name →
/// raw JSON value, exactly as the transport deserialized it.
pub type Patch = serde_json::Map<String, Value>;

// ============================================================================
// ENTITY CONTRACT
// ============================================================================

/// Shared contract every catalog entity satisfies.
///
/// `update` takes a partial payload and applies the entity's allow-list:
/// unknown keys are ignored, every supplied known field is validated
/// before anything is written, and `updated_at` advances only when at
/// least one known field was supplied.
pub trait Entity: Clone {
    /// Stable identifier, generated at construction.
    fn id(&self) -> &str;

    /// String view of a named attribute, for lookup-by-attribute.
    /// Returns `None` for attributes the entity does not expose.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Apply a partial update. All-or-nothing: a single invalid field
    /// rejects the whole patch and leaves the entity untouched.
    fn update(&mut self, patch: &Patch) -> Result<()>;
}

// ============================================================================
// RAW VALUE HELPERS
// ============================================================================

/// Look up a required field, rejecting an absent key as a shape error.
pub(crate) fn require<'a>(payload: &'a Patch, field: &str) -> Result<&'a Value> {
    payload
        .get(field)
        .ok_or_else(|| CatalogError::wrong_type(field, "provided"))
}

/// JSON string, or WrongType.
pub(crate) fn string_value(field: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CatalogError::wrong_type(field, "a string"))
}

/// JSON boolean, or WrongType.
pub(crate) fn bool_value(field: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| CatalogError::wrong_type(field, "a boolean"))
}

/// JSON number (integer or float), coerced to f64, or WrongType.
pub(crate) fn float_value(field: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| CatalogError::wrong_type(field, "a number"))
}

/// JSON integer, strictly: floats and numeric strings are WrongType.
pub(crate) fn int_value(field: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| CatalogError::wrong_type(field, "an integer"))
}

/// JSON array of strings, or WrongType.
pub(crate) fn id_list_value(field: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| CatalogError::wrong_type(field, "a list of ids"))?;

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(id) => ids.push(id.to_string()),
            None => return Err(CatalogError::wrong_type(field, "a list of ids")),
        }
    }
    Ok(ids)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_present_and_absent() {
        let mut payload = Patch::new();
        payload.insert("title".to_string(), json!("Loft"));

        assert!(require(&payload, "title").is_ok());

        let err = require(&payload, "price").unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("price", "provided"));
    }

    #[test]
    fn test_string_value_rejects_other_shapes() {
        assert_eq!(string_value("name", &json!("Wifi")).unwrap(), "Wifi");
        assert!(string_value("name", &json!(42)).is_err());
        assert!(string_value("name", &json!(null)).is_err());
        assert!(string_value("name", &json!(["Wifi"])).is_err());
    }

    #[test]
    fn test_bool_value_rejects_other_shapes() {
        assert!(bool_value("is_admin", &json!(true)).unwrap());
        assert!(bool_value("is_admin", &json!("true")).is_err());
        assert!(bool_value("is_admin", &json!(1)).is_err());
    }

    #[test]
    fn test_float_value_accepts_ints_and_floats() {
        assert_eq!(float_value("price", &json!(10)).unwrap(), 10.0);
        assert_eq!(float_value("price", &json!(10.5)).unwrap(), 10.5);
        assert!(float_value("price", &json!("10")).is_err());
        assert!(float_value("price", &json!(true)).is_err());
    }

    #[test]
    fn test_int_value_is_strict() {
        assert_eq!(int_value("rating", &json!(5)).unwrap(), 5);
        // a float or numeric string is a shape error, not a range error
        assert!(int_value("rating", &json!(5.0)).is_err());
        assert!(int_value("rating", &json!("5")).is_err());
        assert!(int_value("rating", &json!(true)).is_err());
    }

    #[test]
    fn test_id_list_value() {
        let ids = id_list_value("amenities", &json!(["a", "b"])).unwrap();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);

        assert!(id_list_value("amenities", &json!([])).unwrap().is_empty());
        assert!(id_list_value("amenities", &json!("a")).is_err());
        assert!(id_list_value("amenities", &json!(["a", 2])).is_err());
    }
}
