// 🏠 Place Entity - A property listed in the catalog
//
// Carries two kinds of relations, both stored as identifiers:
// - owner_id / amenities: supplied by callers, resolved by the facade
//   before anything is written
// - reviews: never directly settable, maintained only by the review
//   lifecycle (attach on create, detach on delete)
//
// Field rules:
// - title: trimmed, non-empty, at most 100 characters
// - description: optional, trimmed, at most 1000 characters, "" when absent
// - price: number (int or float), coerced to float, >= 0
// - latitude: number in -90..=90, longitude: number in -180..=180

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{float_value, id_list_value, require, string_value, Entity, Patch};
use crate::error::{CatalogError, Result};

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

fn validate_title(value: &Value) -> Result<String> {
    let title = string_value("title", value)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(CatalogError::invalid_value("title", "is required"));
    }
    if title.chars().count() > 100 {
        return Err(CatalogError::invalid_value("title", "max length is 100"));
    }
    Ok(title.to_string())
}

/// Null is treated as "no description" and stored as an empty string.
fn validate_description(value: &Value) -> Result<String> {
    if value.is_null() {
        return Ok(String::new());
    }
    let description = string_value("description", value)?;
    let description = description.trim();
    if description.chars().count() > 1000 {
        return Err(CatalogError::invalid_value("description", "max length is 1000"));
    }
    Ok(description.to_string())
}

fn validate_price(value: &Value) -> Result<f64> {
    let price = float_value("price", value)?;
    if price < 0.0 {
        return Err(CatalogError::invalid_value("price", "must be >= 0"));
    }
    Ok(price)
}

fn validate_latitude(value: &Value) -> Result<f64> {
    let latitude = float_value("latitude", value)?;
    if latitude < -90.0 || latitude > 90.0 {
        return Err(CatalogError::invalid_value("latitude", "must be between -90 and 90"));
    }
    Ok(latitude)
}

fn validate_longitude(value: &Value) -> Result<f64> {
    let longitude = float_value("longitude", value)?;
    if longitude < -180.0 || longitude > 180.0 {
        return Err(CatalogError::invalid_value(
            "longitude",
            "must be between -180 and 180",
        ));
    }
    Ok(longitude)
}

/// Shape check only. Whether the account exists is the facade's call.
pub(crate) fn validate_owner_id(value: &Value) -> Result<String> {
    let owner_id = string_value("owner_id", value)?;
    let owner_id = owner_id.trim();
    if owner_id.is_empty() {
        return Err(CatalogError::invalid_value("owner_id", "is required"));
    }
    Ok(owner_id.to_string())
}

/// Shape check only. Whether each amenity exists is the facade's call.
pub(crate) fn validate_amenity_ids(value: &Value) -> Result<Vec<String>> {
    id_list_value("amenities", value)
}

// ============================================================================
// PLACE ENTITY
// ============================================================================

/// A property listed by an account.
///
/// Identity: UUID (never changes)
/// Relations are identifiers, never live object references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,
    pub title: String,
    /// Empty string when no description was supplied.
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Account id of the owner (relationship, not ownership).
    pub owner_id: String,
    /// Ordered amenity ids, as supplied at create/update time.
    pub amenities: Vec<String>,
    /// Ordered review ids, maintained only by the review lifecycle.
    pub reviews: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Build a place from a raw payload plus the relationship ids the
    /// facade already shape-checked and resolved.
    ///
    /// Requires `title`, `price`, `latitude`, `longitude` in the payload;
    /// `description` is optional. `reviews` starts empty.
    pub fn new(payload: &Patch, owner_id: String, amenities: Vec<String>) -> Result<Self> {
        let title = validate_title(require(payload, "title")?)?;
        let description = match payload.get("description") {
            Some(value) => validate_description(value)?,
            None => String::new(),
        };
        let price = validate_price(require(payload, "price")?)?;
        let latitude = validate_latitude(require(payload, "latitude")?)?;
        let longitude = validate_longitude(require(payload, "longitude")?)?;

        let now = Utc::now();
        Ok(Place {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description,
            price,
            latitude,
            longitude,
            owner_id,
            amenities,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Record a review id on this place. Called by the facade when a
    /// review is created; advances `updated_at`.
    pub fn attach_review(&mut self, review_id: &str) {
        self.reviews.push(review_id.to_string());
        self.touch();
    }

    /// Remove a review id from this place. Returns whether the id was
    /// present; `updated_at` advances only when something was removed.
    pub fn detach_review(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|id| id != review_id);
        let removed = self.reviews.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Place {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "title" => Some(self.title.clone()),
            "description" => Some(self.description.clone()),
            "owner_id" => Some(self.owner_id.clone()),
            _ => None,
        }
    }

    /// Allow-list: title, description, price, latitude, longitude,
    /// owner_id, amenities. `reviews` is deliberately absent; review ids
    /// only move through the review lifecycle.
    fn update(&mut self, patch: &Patch) -> Result<()> {
        let mut title = None;
        let mut description = None;
        let mut price = None;
        let mut latitude = None;
        let mut longitude = None;
        let mut owner_id = None;
        let mut amenities = None;
        let mut changed = false;

        // Validate every supplied field before writing any of them.
        // Reference resolution for owner_id/amenities already happened
        // in the facade by the time this runs.
        for (key, value) in patch {
            match key.as_str() {
                "title" => title = Some(validate_title(value)?),
                "description" => description = Some(validate_description(value)?),
                "price" => price = Some(validate_price(value)?),
                "latitude" => latitude = Some(validate_latitude(value)?),
                "longitude" => longitude = Some(validate_longitude(value)?),
                "owner_id" => owner_id = Some(validate_owner_id(value)?),
                "amenities" => amenities = Some(validate_amenity_ids(value)?),
                _ => continue,
            }
            changed = true;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(latitude) = latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = longitude {
            self.longitude = longitude;
        }
        if let Some(owner_id) = owner_id {
            self.owner_id = owner_id;
        }
        if let Some(amenities) = amenities {
            self.amenities = amenities;
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
