// 🛁 Amenity Entity - Features and services a place can offer
//
// Smallest entity in the catalog: a single validated name.
// Name uniqueness is a cross-entity rule and lives in the facade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{require, string_value, Entity, Patch};
use crate::error::{CatalogError, Result};

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

/// Trimmed, non-empty, at most 50 characters.
pub(crate) fn validate_name(value: &Value) -> Result<String> {
    let name = string_value("name", value)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::invalid_value("name", "is required"));
    }
    if name.chars().count() > 50 {
        return Err(CatalogError::invalid_value("name", "max length is 50"));
    }
    Ok(name.to_string())
}

// ============================================================================
// AMENITY ENTITY
// ============================================================================

/// A feature or service that can be attached to places ("Wifi", "Pool").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Amenity {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,
    /// Trimmed display name.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    /// Build an amenity from a raw payload. Requires `name`.
    pub fn new(payload: &Patch) -> Result<Self> {
        let name = validate_name(require(payload, "name")?)?;

        let now = Utc::now();
        Ok(Amenity {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at: now,
            updated_at: now,
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Amenity {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    /// Allow-list: name.
    fn update(&mut self, patch: &Patch) -> Result<()> {
        let mut name = None;
        let mut changed = false;

        for (key, value) in patch {
            match key.as_str() {
                "name" => name = Some(validate_name(value)?),
                _ => continue,
            }
            changed = true;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if changed {
            self.touch();
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Patch {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_amenity_creation() {
        let amenity = Amenity::new(&payload(json!({ "name": "  Wifi " }))).unwrap();

        assert!(!amenity.id.is_empty());
        assert_eq!(amenity.name, "Wifi");
        assert_eq!(amenity.created_at, amenity.updated_at);
    }

    #[test]
    fn test_amenity_name_rules() {
        let err = Amenity::new(&payload(json!({ "name": "" }))).unwrap_err();
        assert_eq!(err, CatalogError::invalid_value("name", "is required"));

        let err = Amenity::new(&payload(json!({ "name": 7 }))).unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("name", "a string"));

        let err = Amenity::new(&payload(json!({}))).unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("name", "provided"));

        let long = "n".repeat(51);
        let err = Amenity::new(&payload(json!({ "name": long }))).unwrap_err();
        assert_eq!(err, CatalogError::invalid_value("name", "max length is 50"));

        // boundary: exactly 50 is accepted
        let ok = Amenity::new(&payload(json!({ "name": "n".repeat(50) }))).unwrap();
        assert_eq!(ok.name.chars().count(), 50);
    }

    #[test]
    fn test_amenity_update() {
        let mut amenity = Amenity::new(&payload(json!({ "name": "Wifi" }))).unwrap();
        let before = amenity.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));

        amenity.update(&payload(json!({ "name": " Fast Wifi " }))).unwrap();
        assert_eq!(amenity.name, "Fast Wifi");
        assert!(amenity.updated_at > before);
    }

    #[test]
    fn test_amenity_update_unknown_keys_ignored() {
        let mut amenity = Amenity::new(&payload(json!({ "name": "Wifi" }))).unwrap();
        let before = amenity.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));

        amenity
            .update(&payload(json!({ "id": "hijacked", "stars": 5 })))
            .unwrap();

        assert_eq!(amenity.name, "Wifi");
        assert_eq!(amenity.updated_at, before);
    }

    #[test]
    fn test_amenity_update_rejects_bad_name_without_touching() {
        let mut amenity = Amenity::new(&payload(json!({ "name": "Wifi" }))).unwrap();
        let before = amenity.updated_at;

        let err = amenity.update(&payload(json!({ "name": "   " }))).unwrap_err();
        assert_eq!(err, CatalogError::invalid_value("name", "is required"));
        assert_eq!(amenity.name, "Wifi");
        assert_eq!(amenity.updated_at, before);
    }

    #[test]
    fn test_amenity_attribute_lookup() {
        let amenity = Amenity::new(&payload(json!({ "name": "Pool" }))).unwrap();

        assert_eq!(amenity.attribute("name").as_deref(), Some("Pool"));
        assert_eq!(amenity.attribute("id").as_deref(), Some(amenity.id.as_str()));
        assert!(amenity.attribute("size").is_none());
    }
}
